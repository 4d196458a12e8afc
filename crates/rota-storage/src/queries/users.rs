// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use rota_core::RotaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{User, UserId};

fn map_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: UserId(row.get(0)?),
        name: row.get(1)?,
        surname: row.get(2)?,
        is_admin: row.get(3)?,
    })
}

/// Create a new user. Fails on a duplicate id.
pub async fn create_user(db: &Database, user: &User) -> Result<(), RotaError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, name, surname, is_admin) VALUES (?1, ?2, ?3, ?4)",
                params![user.id.0, user.name, user.surname, user.is_admin],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by chat identity.
pub async fn get_user(db: &Database, id: &UserId) -> Result<Option<User>, RotaError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, surname, is_admin FROM users WHERE id = ?1")?;
            let result = stmt.query_row(params![id], map_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a user by the exact (name, surname) pair.
///
/// The registration duplicate check is case-sensitive and identity-blind:
/// two different identities may not share the same pair.
pub async fn find_by_name_surname(
    db: &Database,
    name: &str,
    surname: &str,
) -> Result<Option<User>, RotaError> {
    let name = name.to_string();
    let surname = surname.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, surname, is_admin FROM users
                 WHERE name = ?1 AND surname = ?2",
            )?;
            let result = stmt.query_row(params![name, surname], map_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All registered user ids, for lifecycle broadcasts.
pub async fn all_user_ids(db: &Database) -> Result<Vec<UserId>, RotaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM users ORDER BY id")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut ids = Vec::new();
            for row in rows {
                ids.push(UserId(row?));
            }
            Ok(ids)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_user(id: &str, name: &str, surname: &str) -> User {
        User {
            id: UserId(id.to_string()),
            name: name.to_string(),
            surname: surname.to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn create_and_get_user_roundtrips() {
        let (db, _dir) = setup_db().await;
        let user = make_user("u1", "Ana", "Lee");

        create_user(&db, &user).await.unwrap();
        let retrieved = get_user(&db, &UserId::from("u1")).await.unwrap().unwrap();
        assert_eq!(retrieved, user);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_user_returns_none() {
        let (db, _dir) = setup_db().await;
        let result = get_user(&db, &UserId::from("ghost")).await.unwrap();
        assert!(result.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let (db, _dir) = setup_db().await;
        create_user(&db, &make_user("u1", "Ana", "Lee")).await.unwrap();
        let result = create_user(&db, &make_user("u1", "Bob", "Ray")).await;
        assert!(result.is_err(), "second insert with same id should fail");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn name_surname_lookup_is_case_sensitive() {
        let (db, _dir) = setup_db().await;
        create_user(&db, &make_user("u1", "Ana", "Lee")).await.unwrap();

        let hit = find_by_name_surname(&db, "Ana", "Lee").await.unwrap();
        assert!(hit.is_some());

        let miss = find_by_name_surname(&db, "ana", "lee").await.unwrap();
        assert!(miss.is_none(), "lookup must be case-sensitive");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn all_user_ids_lists_everyone() {
        let (db, _dir) = setup_db().await;
        create_user(&db, &make_user("a", "Ana", "Lee")).await.unwrap();
        create_user(&db, &make_user("b", "Bob", "Ray")).await.unwrap();

        let ids = all_user_ids(&db).await.unwrap();
        assert_eq!(ids, vec![UserId::from("a"), UserId::from("b")]);

        db.close().await.unwrap();
    }
}
