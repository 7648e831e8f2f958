use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::database::entities::{persons, relationships};
use crate::tree::{FamilyGraph, PersonRecord, RelationshipRecord};

/// Assembles the derived family graph from a user's stored rows.
#[derive(Clone)]
pub struct FamilyService {
    db: DatabaseConnection,
}

impl FamilyService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the caller's persons and relationships in creation order and
    /// build a fresh graph. The graph is transient; every call rebuilds it
    /// from scratch.
    pub async fn load_graph(&self, user_id: i32) -> Result<FamilyGraph, DbErr> {
        let persons: Vec<PersonRecord> = persons::Entity::find()
            .filter(persons::Column::UserId.eq(user_id))
            .order_by_asc(persons::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(PersonRecord::from)
            .collect();

        let relationships: Vec<RelationshipRecord> = relationships::Entity::find()
            .filter(relationships::Column::UserId.eq(user_id))
            .order_by_asc(relationships::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(RelationshipRecord::from)
            .collect();

        Ok(FamilyGraph::build(&persons, &relationships))
    }
}

impl From<persons::Model> for PersonRecord {
    fn from(model: persons::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            gender: model.gender,
            birthdate: model.birthdate,
            profile_picture: model.profile_picture,
        }
    }
}

impl From<relationships::Model> for RelationshipRecord {
    fn from(model: relationships::Model) -> Self {
        Self {
            person_id: model.person_id,
            related_person_id: model.related_person_id,
            relation_type: model.relation_type,
        }
    }
}
