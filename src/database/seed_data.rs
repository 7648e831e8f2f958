use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::*;
use tracing::info;

use crate::database::entities::{persons, relationships, users};
use crate::services::auth_service::AuthService;

/// Provision a demo account with a small three-generation family so a fresh
/// database has something to render.
pub async fn create_example_family(db: &DatabaseConnection) -> Result<()> {
    let existing_user = users::Entity::find()
        .filter(users::Column::Email.eq("demo@genlink.local"))
        .one(db)
        .await?;

    if existing_user.is_some() {
        info!("Demo account already exists, skipping seed data creation");
        return Ok(());
    }

    info!("Creating demo account: demo@genlink.local");

    let password_hash = AuthService::hash_password("genlink-demo")?;
    let user = users::ActiveModel::new("demo@genlink.local".to_string(), password_hash, None)
        .insert(db)
        .await?;

    info!("Created demo user with ID: {}", user.id);

    let family = [
        // (full_name, gender, birthdate)
        ("Arthur Hale", "male", Some((1938, 3, 14))),
        ("Margaret Hale", "female", Some((1941, 7, 2))),
        ("Thomas Hale", "male", Some((1964, 11, 23))),
        ("Susan Hale", "female", Some((1966, 5, 9))),
        ("Emily Hale", "female", Some((1992, 1, 30))),
        ("Jack Hale", "male", Some((1995, 9, 17))),
    ];

    let mut ids = Vec::new();
    for (full_name, gender, birthdate) in family {
        let now = Utc::now();
        let person = persons::ActiveModel {
            user_id: Set(user.id),
            full_name: Set(full_name.to_string()),
            gender: Set(gender.to_string()),
            birthdate: Set(birthdate.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))),
            notes: Set(None),
            profile_picture: Set(None),
            created_at: Set(now),
            ..Default::default()
        };
        let person = person.insert(db).await?;
        ids.push(person.id);
    }

    let [arthur, margaret, thomas, susan, emily, jack] = ids[..] else {
        anyhow::bail!("unexpected number of seeded persons");
    };

    let edges = [
        (arthur, margaret, "spouse"),
        (arthur, thomas, "father"),
        (margaret, thomas, "mother"),
        (thomas, susan, "spouse"),
        (thomas, emily, "father"),
        (susan, emily, "mother"),
        (thomas, jack, "father"),
        (susan, jack, "mother"),
    ];

    for (person_id, related_person_id, relation_type) in edges {
        let relationship = relationships::ActiveModel {
            user_id: Set(user.id),
            person_id: Set(person_id),
            related_person_id: Set(related_person_id),
            relation_type: Set(relation_type.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        relationship.insert(db).await?;
    }

    info!(
        "Seeded {} persons and {} relationships for the demo account",
        family.len(),
        edges.len()
    );
    Ok(())
}
