//! Whitespace tokenization and validation for `insert` / `select`.
//!
//! Validation order mirrors the original: syntax (all three tokens
//! present), then id range, then string length.
use super::statement::Statement;
use crate::errors::Error;
use crate::storage::row::{self, Row};

pub fn prepare_statement(input: &str) -> Result<Statement, Error> {
    if input.starts_with("insert") {
        prepare_insert(input)
    } else if input == "select" {
        Ok(Statement::Select)
    } else {
        Err(Error::Syntax(format!(
            "Error: Unrecognized keyword at start of '{}'.",
            input
        )))
    }
}

fn prepare_insert(input: &str) -> Result<Statement, Error> {
    let mut tokens = input.split_whitespace();
    tokens.next(); // "insert"
    let (id_str, username, email) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(id), Some(username), Some(email)) => (id, username, email),
        _ => return Err(Error::Syntax("Error: Syntax error".into())),
    };

    let id: i64 = id_str
        .parse()
        .map_err(|_| Error::Syntax("Error: Syntax error".into()))?;
    if id < 0 {
        return Err(Error::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| Error::Syntax("Error: Syntax error".into()))?;

    if username.len() > row::USERNAME_SIZE || email.len() > row::EMAIL_SIZE {
        return Err(Error::StringTooLong);
    }

    let row = Row::new(id, username, email).expect("lengths already validated above");
    Ok(Statement::Insert(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_insert() {
        match prepare_statement("insert 1 alice alice@example.com").unwrap() {
            Statement::Insert(row) => {
                assert_eq!(row.id, 1);
                assert_eq!(row.username(), "alice");
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn parses_select() {
        assert!(matches!(prepare_statement("select").unwrap(), Statement::Select));
    }

    #[test]
    fn rejects_missing_tokens() {
        assert!(matches!(
            prepare_statement("insert 1 alice"),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn rejects_negative_id() {
        assert!(matches!(
            prepare_statement("insert -1 alice alice@example.com"),
            Err(Error::NegativeId)
        ));
    }

    #[test]
    fn rejects_overlength_username() {
        let username = "u".repeat(row::USERNAME_SIZE + 1);
        let input = format!("insert 1 {} alice@example.com", username);
        assert!(matches!(prepare_statement(&input), Err(Error::StringTooLong)));
    }

    #[test]
    fn rejects_unrecognized_keyword() {
        assert!(matches!(prepare_statement("delete 1"), Err(Error::Syntax(_))));
    }
}
