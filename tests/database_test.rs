//! Database functionality tests
//!
//! Tests for database migrations, entity operations, and data integrity

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use genlink::database::entities::*;
use genlink::database::setup_database;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tempfile::NamedTempFile;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

async fn insert_user(db: &DatabaseConnection, email: &str) -> Result<users::Model> {
    let user = users::ActiveModel::new(email.to_string(), "not-a-real-hash".to_string(), None)
        .insert(db)
        .await?;
    Ok(user)
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by attempting to query them
    let users = users::Entity::find().all(&db).await?;
    assert_eq!(users.len(), 0);

    let persons = persons::Entity::find().all(&db).await?;
    assert_eq!(persons.len(), 0);

    let relationships = relationships::Entity::find().all(&db).await?;
    assert_eq!(relationships.len(), 0);

    let sessions = user_sessions::Entity::find().all(&db).await?;
    assert_eq!(sessions.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_person_crud_operations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let user = insert_user(&db, "alice@example.com").await?;

    let person = persons::ActiveModel {
        user_id: Set(user.id),
        full_name: Set("Arthur Hale".to_string()),
        gender: Set("male".to_string()),
        birthdate: Set(NaiveDate::from_ymd_opt(1938, 3, 14)),
        notes: Set(Some("grandfather".to_string())),
        profile_picture: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let person = person.insert(&db).await?;
    assert_eq!(person.full_name, "Arthur Hale");
    assert_eq!(person.birthdate, NaiveDate::from_ymd_opt(1938, 3, 14));

    let found = persons::Entity::find_by_id(person.id)
        .one(&db)
        .await?
        .expect("Person should exist");
    assert_eq!(found.user_id, user.id);
    assert_eq!(found.gender, "male");

    let mut update: persons::ActiveModel = found.into();
    update.full_name = Set("Arthur J. Hale".to_string());
    let updated = update.update(&db).await?;
    assert_eq!(updated.full_name, "Arthur J. Hale");

    persons::Entity::delete_by_id(person.id).exec(&db).await?;
    assert!(persons::Entity::find_by_id(person.id)
        .one(&db)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
async fn test_relationship_rows_scope_to_owner() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let alice = insert_user(&db, "alice@example.com").await?;
    let bob = insert_user(&db, "bob@example.com").await?;

    let mut ids = Vec::new();
    for (owner, full_name) in [(&alice, "Arthur"), (&alice, "Thomas"), (&bob, "Eve")] {
        let person = persons::ActiveModel {
            user_id: Set(owner.id),
            full_name: Set(full_name.to_string()),
            gender: Set("other".to_string()),
            birthdate: Set(None),
            notes: Set(None),
            profile_picture: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        ids.push(person.insert(&db).await?.id);
    }

    let relationship = relationships::ActiveModel {
        user_id: Set(alice.id),
        person_id: Set(ids[0]),
        related_person_id: Set(ids[1]),
        relation_type: Set("father".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    relationship.insert(&db).await?;

    let alice_rows = relationships::Entity::find()
        .filter(relationships::Column::UserId.eq(alice.id))
        .all(&db)
        .await?;
    assert_eq!(alice_rows.len(), 1);
    assert_eq!(alice_rows[0].person_id, ids[0]);

    let bob_rows = relationships::Entity::find()
        .filter(relationships::Column::UserId.eq(bob.id))
        .all(&db)
        .await?;
    assert!(bob_rows.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_session_round_trip() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let user = insert_user(&db, "alice@example.com").await?;

    let session = user_sessions::ActiveModel {
        session_id: Set("test-session-token".to_string()),
        user_id: Set(user.id),
        created_at: Set(Utc::now()),
        expires_at: Set(Utc::now() + chrono::Duration::days(7)),
        ..Default::default()
    };
    let session = session.insert(&db).await?;

    let found = user_sessions::Entity::find()
        .filter(user_sessions::Column::SessionId.eq("test-session-token"))
        .one(&db)
        .await?
        .expect("Session should exist");
    assert_eq!(found.user_id, user.id);
    assert!(found.expires_at > found.created_at);

    user_sessions::Entity::delete_by_id(session.id)
        .exec(&db)
        .await?;
    assert!(user_sessions::Entity::find_by_id(session.id)
        .one(&db)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
async fn test_unique_email_constraint() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    insert_user(&db, "alice@example.com").await?;

    let duplicate = insert_user(&db, "alice@example.com").await;
    assert!(duplicate.is_err());

    Ok(())
}
