use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Flat person record as supplied by the persistence layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonRecord {
    pub id: i32,
    pub full_name: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
    pub profile_picture: Option<String>,
}

/// Flat directed relationship edge between two persons.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelationshipRecord {
    pub person_id: i32,
    pub related_person_id: i32,
    pub relation_type: String,
}

/// Recognised relationship kinds. Anything else parses to `Other` and has no
/// structural effect on the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Father,
    Mother,
    Son,
    Daughter,
    Spouse,
    Sibling,
    Other,
}

impl RelationKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "father" => Self::Father,
            "mother" => Self::Mother,
            "son" => Self::Son,
            "daughter" => Self::Daughter,
            "spouse" => Self::Spouse,
            "sibling" => Self::Sibling,
            _ => Self::Other,
        }
    }
}

/// One person in the derived graph. Links are id references into the owning
/// [`FamilyGraph`] arena, never direct node references.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FamilyNode {
    pub person: PersonRecord,
    pub children: Vec<i32>,
    pub parents: Vec<i32>,
    pub spouse: Option<i32>,
}

impl FamilyNode {
    fn new(person: PersonRecord) -> Self {
        Self {
            person,
            children: Vec::new(),
            parents: Vec::new(),
            spouse: None,
        }
    }
}

/// Derived family graph: an arena of nodes keyed by person id. Rebuilt from
/// scratch whenever the underlying person/relationship lists change; never
/// persisted or mutated incrementally.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FamilyGraph {
    nodes: IndexMap<i32, FamilyNode>,
}

impl FamilyGraph {
    /// Build the graph from flat records. Edges whose endpoints are not both
    /// present are dropped; malformed input can degrade the tree but never
    /// fails the build.
    pub fn build(persons: &[PersonRecord], relationships: &[RelationshipRecord]) -> Self {
        let mut nodes: IndexMap<i32, FamilyNode> = persons
            .iter()
            .map(|p| (p.id, FamilyNode::new(p.clone())))
            .collect();

        for rel in relationships {
            if !nodes.contains_key(&rel.person_id) || !nodes.contains_key(&rel.related_person_id) {
                debug!(
                    "Skipping dangling relationship {} -[{}]-> {}",
                    rel.person_id, rel.relation_type, rel.related_person_id
                );
                continue;
            }

            match RelationKind::parse(&rel.relation_type) {
                RelationKind::Father | RelationKind::Mother => {
                    // Source is parent of target.
                    add_parent(&mut nodes, rel.related_person_id, rel.person_id);
                    add_child(&mut nodes, rel.person_id, rel.related_person_id);
                }
                RelationKind::Son | RelationKind::Daughter => {
                    // Source is child of target.
                    add_parent(&mut nodes, rel.person_id, rel.related_person_id);
                    add_child(&mut nodes, rel.related_person_id, rel.person_id);
                }
                RelationKind::Spouse => {
                    // Mutual, last writer wins on repeated spouse edges.
                    if let Some(node) = nodes.get_mut(&rel.person_id) {
                        node.spouse = Some(rel.related_person_id);
                    }
                    if let Some(node) = nodes.get_mut(&rel.related_person_id) {
                        node.spouse = Some(rel.person_id);
                    }
                }
                // Siblings are expected to be inferred via shared parents;
                // no inference is materialized here.
                RelationKind::Sibling | RelationKind::Other => {}
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node for `root_id`, or `None` when no such person exists.
    pub fn root(&self, root_id: i32) -> Option<&FamilyNode> {
        self.nodes.get(&root_id)
    }

    /// Render the tree rooted at `root_id`. `None` means nothing to display,
    /// not an error.
    pub fn render(&self, root_id: i32) -> Option<FamilyLevel> {
        self.render_from(root_id, 0, HashSet::new())
    }

    /// Depth-first render from an arbitrary node. The visited set is cloned
    /// per child branch: siblings never see each other's markings, only
    /// ancestor markings, so a shared descendant renders in every branch that
    /// reaches it while a lineage path can never cycle back on itself.
    pub fn render_from(
        &self,
        id: i32,
        depth: i32,
        mut visited: HashSet<i32>,
    ) -> Option<FamilyLevel> {
        let node = self.nodes.get(&id)?;
        if !visited.insert(id) {
            return None;
        }

        let spouse = node
            .spouse
            .and_then(|spouse_id| self.nodes.get(&spouse_id))
            .map(|n| PersonCard::from_person(&n.person));

        let children: Vec<FamilyLevel> = node
            .children
            .iter()
            .filter_map(|&child_id| self.render_from(child_id, depth + 1, visited.clone()))
            .collect();

        Some(FamilyLevel {
            person: PersonCard::from_person(&node.person),
            spouse,
            depth,
            tier: depth.min(2),
            children,
        })
    }
}

fn add_parent(nodes: &mut IndexMap<i32, FamilyNode>, child_id: i32, parent_id: i32) {
    if let Some(node) = nodes.get_mut(&child_id) {
        if !node.parents.contains(&parent_id) {
            node.parents.push(parent_id);
        }
    }
}

fn add_child(nodes: &mut IndexMap<i32, FamilyNode>, parent_id: i32, child_id: i32) {
    if let Some(node) = nodes.get_mut(&parent_id) {
        if !node.children.contains(&child_id) {
            node.children.push(child_id);
        }
    }
}

/// One rendered person card. The spouse of a level is a plain card, never a
/// subtree of its own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonCard {
    pub id: i32,
    pub full_name: String,
    pub gender: String,
    pub initial: char,
    pub birthdate: Option<NaiveDate>,
    pub profile_picture: Option<String>,
}

impl PersonCard {
    fn from_person(person: &PersonRecord) -> Self {
        let initial = match person.gender.trim().to_lowercase().as_str() {
            "male" => 'M',
            "female" => 'F',
            _ => 'U',
        };
        Self {
            id: person.id,
            full_name: person.full_name.clone(),
            gender: person.gender.clone(),
            initial,
            birthdate: person.birthdate,
            profile_picture: person.profile_picture.clone(),
        }
    }
}

/// One generation tier of the rendered tree.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FamilyLevel {
    pub person: PersonCard,
    pub spouse: Option<PersonCard>,
    pub depth: i32,
    /// Visual styling keys off `min(depth, 2)`: root, children, everyone else.
    pub tier: i32,
    pub children: Vec<FamilyLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i32, name: &str) -> PersonRecord {
        PersonRecord {
            id,
            full_name: name.to_string(),
            gender: "other".to_string(),
            birthdate: None,
            profile_picture: None,
        }
    }

    fn rel(person_id: i32, related_person_id: i32, relation_type: &str) -> RelationshipRecord {
        RelationshipRecord {
            person_id,
            related_person_id,
            relation_type: relation_type.to_string(),
        }
    }

    fn create_test_family() -> (Vec<PersonRecord>, Vec<RelationshipRecord>) {
        let persons = vec![
            person(1, "Alice"),
            person(2, "Bob"),
            person(3, "Cara"),
            person(4, "Dan"),
        ];
        let relationships = vec![
            rel(1, 2, "father"),
            rel(1, 3, "mother"),
            rel(1, 4, "spouse"),
        ];
        (persons, relationships)
    }

    #[test]
    fn test_build_returns_root() {
        let (persons, relationships) = create_test_family();
        let graph = FamilyGraph::build(&persons, &relationships);

        let root = graph.root(1).unwrap();
        assert_eq!(root.person.id, 1);
        assert_eq!(root.children, vec![2, 3]);
        assert_eq!(root.spouse, Some(4));

        assert_eq!(graph.root(2).unwrap().parents, vec![1]);
        assert_eq!(graph.root(3).unwrap().parents, vec![1]);
        assert_eq!(graph.root(4).unwrap().spouse, Some(1));
    }

    #[test]
    fn test_missing_root_is_none() {
        let (persons, relationships) = create_test_family();
        let graph = FamilyGraph::build(&persons, &relationships);

        assert!(graph.root(99).is_none());
        assert!(graph.render(99).is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let (persons, relationships) = create_test_family();
        let first = FamilyGraph::build(&persons, &relationships);
        let second = FamilyGraph::build(&persons, &relationships);

        assert_eq!(first.render(1), second.render(1));
    }

    #[test]
    fn test_son_daughter_invert_direction() {
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        // Source is the child, target the parent.
        let graph = FamilyGraph::build(&persons, &[rel(1, 2, "daughter")]);

        assert_eq!(graph.root(1).unwrap().parents, vec![2]);
        assert_eq!(graph.root(2).unwrap().children, vec![1]);
    }

    #[test]
    fn test_relation_type_is_case_insensitive() {
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        let graph = FamilyGraph::build(&persons, &[rel(1, 2, "FATHER")]);

        assert_eq!(graph.root(1).unwrap().children, vec![2]);
    }

    #[test]
    fn test_duplicate_edges_do_not_duplicate_links() {
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        let relationships = vec![
            rel(1, 2, "father"),
            rel(1, 2, "father"),
            rel(2, 1, "son"), // same edge encoded from the other side
        ];
        let graph = FamilyGraph::build(&persons, &relationships);

        assert_eq!(graph.root(1).unwrap().children, vec![2]);
        assert_eq!(graph.root(2).unwrap().parents, vec![1]);
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let persons = vec![person(1, "Alice")];
        let relationships = vec![rel(1, 99, "father"), rel(98, 1, "mother")];
        let graph = FamilyGraph::build(&persons, &relationships);

        let root = graph.root(1).unwrap();
        assert!(root.children.is_empty());
        assert!(root.parents.is_empty());
    }

    #[test]
    fn test_unknown_relation_type_is_a_no_op() {
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        let graph = FamilyGraph::build(&persons, &[rel(1, 2, "cousin")]);

        let root = graph.root(1).unwrap();
        assert!(root.children.is_empty());
        assert!(root.parents.is_empty());
        assert!(root.spouse.is_none());
    }

    #[test]
    fn sibling_edges_have_no_structural_effect() {
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        let graph = FamilyGraph::build(&persons, &[rel(1, 2, "sibling")]);

        let root = graph.root(1).unwrap();
        assert!(root.children.is_empty());
        assert!(root.parents.is_empty());
        assert!(root.spouse.is_none());
    }

    #[test]
    fn spouse_overwrite_keeps_last() {
        let persons = vec![person(1, "Alice"), person(4, "Dan"), person(5, "Eve")];
        let relationships = vec![rel(1, 4, "spouse"), rel(1, 5, "spouse")];
        let graph = FamilyGraph::build(&persons, &relationships);

        assert_eq!(graph.root(1).unwrap().spouse, Some(5));
        assert_eq!(graph.root(5).unwrap().spouse, Some(1));
        // Dan still points at Alice; nothing clears the stale side.
        assert_eq!(graph.root(4).unwrap().spouse, Some(1));
    }

    #[test]
    fn test_render_tiers_and_spouse_pairing() {
        let (persons, relationships) = create_test_family();
        let graph = FamilyGraph::build(&persons, &relationships);

        let tree = graph.render(1).unwrap();
        assert_eq!(tree.person.id, 1);
        assert_eq!(tree.depth, 0);
        assert_eq!(tree.tier, 0);
        assert_eq!(tree.spouse.as_ref().unwrap().id, 4);

        let child_ids: Vec<i32> = tree.children.iter().map(|c| c.person.id).collect();
        assert_eq!(child_ids, vec![2, 3]);
        assert_eq!(tree.children[0].depth, 1);
        assert_eq!(tree.children[0].tier, 1);
    }

    #[test]
    fn test_tier_caps_at_two() {
        let persons = vec![
            person(1, "Alice"),
            person(2, "Bob"),
            person(3, "Cara"),
            person(4, "Dan"),
        ];
        let relationships = vec![
            rel(1, 2, "father"),
            rel(2, 3, "father"),
            rel(3, 4, "father"),
        ];
        let graph = FamilyGraph::build(&persons, &relationships);

        let tree = graph.render(1).unwrap();
        let grandchild = &tree.children[0].children[0];
        let great_grandchild = &grandchild.children[0];
        assert_eq!(grandchild.depth, 2);
        assert_eq!(grandchild.tier, 2);
        assert_eq!(great_grandchild.depth, 3);
        assert_eq!(great_grandchild.tier, 2);
    }

    #[test]
    fn test_cyclic_data_terminates() {
        // A is father of B and B is (incorrectly) also father of A.
        let persons = vec![person(1, "Alice"), person(2, "Bob")];
        let relationships = vec![rel(1, 2, "father"), rel(2, 1, "father")];
        let graph = FamilyGraph::build(&persons, &relationships);

        let tree = graph.render(1).unwrap();
        assert_eq!(tree.person.id, 1);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].person.id, 2);
        // The lineage path stops where it would revisit the root.
        assert!(tree.children[0].children.is_empty());
    }

    #[test]
    fn test_self_referential_edge_terminates() {
        let persons = vec![person(1, "Alice")];
        let graph = FamilyGraph::build(&persons, &[rel(1, 1, "father")]);

        let tree = graph.render(1).unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_shared_descendant_renders_in_every_branch() {
        // R has children A and B; both A and B are parents of Z. The visited
        // set is copied per branch, so Z must show up under A and under B.
        let persons = vec![
            person(1, "Root"),
            person(2, "A"),
            person(3, "B"),
            person(4, "Z"),
        ];
        let relationships = vec![
            rel(1, 2, "father"),
            rel(1, 3, "father"),
            rel(2, 4, "father"),
            rel(3, 4, "mother"),
        ];
        let graph = FamilyGraph::build(&persons, &relationships);

        let tree = graph.render(1).unwrap();
        assert_eq!(tree.children.len(), 2);
        for branch in &tree.children {
            assert_eq!(branch.children.len(), 1);
            assert_eq!(branch.children[0].person.id, 4);
        }
    }

    #[test]
    fn test_render_from_respects_prior_visits() {
        let (persons, relationships) = create_test_family();
        let graph = FamilyGraph::build(&persons, &relationships);

        let mut visited = HashSet::new();
        visited.insert(1);
        assert!(graph.render_from(1, 0, visited).is_none());
    }

    #[test]
    fn test_gender_initial() {
        let mut p = person(1, "Alice");
        p.gender = "Female".to_string();
        let graph = FamilyGraph::build(&[p], &[]);
        let tree = graph.render(1).unwrap();
        assert_eq!(tree.person.initial, 'F');

        let mut p = person(2, "Bob");
        p.gender = "male".to_string();
        let graph = FamilyGraph::build(&[p], &[]);
        assert_eq!(graph.render(2).unwrap().person.initial, 'M');

        let graph = FamilyGraph::build(&[person(3, "Kim")], &[]);
        assert_eq!(graph.render(3).unwrap().person.initial, 'U');
    }
}
