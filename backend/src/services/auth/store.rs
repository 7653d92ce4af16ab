//! Sqlite-backed user and session storage.
//!
//! Passwords are stored as MD5 digests and session tokens are random
//! UUIDs handed out at login. Every handler opens its own short-lived
//! connection, the same way the rest of the backend talks to sqlite.

use actix_web::HttpRequest;
use rusqlite::{params, Connection};

/// Creates the `users` and `sessions` tables if they do not exist yet.
pub fn initialize(db_path: &str) -> Result<(), rusqlite::Error> {
    let conn = Connection::open(db_path)?;
    create_tables(&conn)
}

fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            email TEXT PRIMARY KEY,
            pass_md5 TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            email TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn digest(password: &str) -> String {
    format!("{:x}", md5::compute(password.as_bytes()))
}

/// Inserts a new user. Fails if the e-mail is already registered.
pub fn create_user(conn: &Connection, email: &str, password: &str) -> Result<(), String> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO users (email, pass_md5) VALUES (?1, ?2)",
            params![email, digest(password)],
        )
        .map_err(|e| e.to_string())?;
    if inserted == 0 {
        return Err("User already exists".to_string());
    }
    Ok(())
}

/// Checks the credentials and, when they match, opens a new session.
///
/// Returns the fresh session token, or `None` for unknown users and
/// wrong passwords alike.
pub fn login(conn: &Connection, email: &str, password: &str) -> Result<Option<String>, String> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT pass_md5 FROM users WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other.to_string()),
        })?;

    match stored {
        Some(hash) if hash == digest(password) => {
            let token = uuid::Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO sessions (token, email) VALUES (?1, ?2)",
                params![token, email],
            )
            .map_err(|e| e.to_string())?;
            Ok(Some(token))
        }
        _ => Ok(None),
    }
}

/// Resolves a session token to the e-mail of the logged-in user.
pub fn session_email(conn: &Connection, token: &str) -> Result<Option<String>, String> {
    conn.query_row(
        "SELECT email FROM sessions WHERE token = ?1",
        params![token],
        |row| row.get(0),
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other.to_string()),
    })
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

/// Resolves the session of an incoming request against the database.
///
/// Any missing header, unknown token or storage error comes back as
/// `None`, which the handlers turn into a 401.
pub fn authenticate(req: &HttpRequest, db_path: &str) -> Option<String> {
    let token = bearer_token(req)?;
    let conn = Connection::open(db_path).ok()?;
    session_email(&conn, &token).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn create_login_me_round_trip() {
        let conn = open_test_db();
        create_user(&conn, "ana@example.com", "s3cret").unwrap();

        let token = login(&conn, "ana@example.com", "s3cret")
            .unwrap()
            .expect("valid credentials should open a session");
        let email = session_email(&conn, &token).unwrap();
        assert_eq!(email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let conn = open_test_db();
        create_user(&conn, "ana@example.com", "s3cret").unwrap();

        assert!(login(&conn, "ana@example.com", "nope").unwrap().is_none());
        assert!(login(&conn, "ghost@example.com", "s3cret").unwrap().is_none());
    }

    #[test]
    fn duplicate_user_is_rejected() {
        let conn = open_test_db();
        create_user(&conn, "ana@example.com", "s3cret").unwrap();
        assert!(create_user(&conn, "ana@example.com", "other").is_err());
    }

    #[test]
    fn stale_token_resolves_to_none() {
        let conn = open_test_db();
        let email = session_email(&conn, "not-a-session").unwrap();
        assert!(email.is_none());
    }
}
