//! The hypermedia resource abstraction.
//!
//! A [`Resource`] is an addressable API entity: it has a URI, scalar
//! attributes, and named relations to other resources. Each relation
//! carries an [`Embedding`] policy deciding whether its targets appear
//! inline in the parent representation or as URI strings only. Clients
//! traverse the API by following those URIs from the root resource.

mod choice;
mod question;
mod root;

pub use choice::ChoiceResource;
pub use question::{question_collection, QuestionResource, QUESTIONS_URI};
pub use root::RootResource;

use rocket::serde::json::{serde_json::Map, Value};

/// An addressable API entity with attributes and relations.
pub trait Resource {
    /// The URI of this resource.
    fn uri(&self) -> String;

    /// Scalar attributes of this resource.
    fn attributes(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Named relations to other resources.
    fn relations(&self) -> Vec<Relation> {
        Vec::new()
    }
}

/// Whether a relation's targets are inlined or referenced by URI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embedding {
    /// Inline the full representation of each target.
    Embed,
    /// Reference each target by its URI.
    LinkOnly,
}

/// The resources a relation points at.
pub enum Targets {
    One(Box<dyn Resource>),
    Many(Vec<Box<dyn Resource>>),
}

/// A named link from one resource to one or more others.
pub struct Relation {
    pub name: &'static str,
    pub embedding: Embedding,
    pub targets: Targets,
}

impl Relation {
    /// A relation to a single resource.
    pub fn one(name: &'static str, embedding: Embedding, target: impl Resource + 'static) -> Self {
        Self {
            name,
            embedding,
            targets: Targets::One(Box::new(target)),
        }
    }

    /// A relation to a group of resources.
    pub fn many<R>(
        name: &'static str,
        embedding: Embedding,
        targets: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: Resource + 'static,
    {
        Self {
            name,
            embedding,
            targets: Targets::Many(
                targets
                    .into_iter()
                    .map(|target| Box::new(target) as Box<dyn Resource>)
                    .collect(),
            ),
        }
    }
}

/// A resource enumerating a homogeneous group of members under a
/// collection URI, rendered as a single embedded relation.
pub struct Collection<R> {
    uri: &'static str,
    relation: &'static str,
    members: Vec<R>,
}

impl<R> Collection<R> {
    pub fn new(uri: &'static str, relation: &'static str, members: Vec<R>) -> Self {
        Self {
            uri,
            relation,
            members,
        }
    }
}

impl<R> Resource for Collection<R>
where
    R: Resource + Clone + 'static,
{
    fn uri(&self) -> String {
        self.uri.to_string()
    }

    fn relations(&self) -> Vec<Relation> {
        vec![Relation::many(
            self.relation,
            Embedding::Embed,
            self.members.iter().cloned(),
        )]
    }
}

/// Render a resource to its JSON representation: the resource URI under
/// `url`, then its attributes, then one entry per relation.
///
/// Every representation carries its own `url`, so embedded relations still
/// function as links.
pub fn represent(resource: &dyn Resource) -> Value {
    let mut body = Map::new();
    body.insert("url".to_string(), Value::String(resource.uri()));
    body.extend(resource.attributes());
    for relation in resource.relations() {
        let value = match (relation.embedding, &relation.targets) {
            (Embedding::Embed, Targets::One(target)) => represent(target.as_ref()),
            (Embedding::Embed, Targets::Many(targets)) => Value::Array(
                targets
                    .iter()
                    .map(|target| represent(target.as_ref()))
                    .collect(),
            ),
            (Embedding::LinkOnly, Targets::One(target)) => Value::String(target.uri()),
            (Embedding::LinkOnly, Targets::Many(targets)) => Value::Array(
                targets
                    .iter()
                    .map(|target| Value::String(target.uri()))
                    .collect(),
            ),
        };
        body.insert(relation.name.to_string(), value);
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rocket::serde::json::json;

    /// A fixture resource with one attribute and no relations.
    #[derive(Clone)]
    struct Leaf(u32);

    impl Resource for Leaf {
        fn uri(&self) -> String {
            format!("/leaves/{}", self.0)
        }

        fn attributes(&self) -> Map<String, Value> {
            let mut attributes = Map::new();
            attributes.insert("number".to_string(), Value::from(self.0));
            attributes
        }
    }

    struct Branch {
        embedding: Embedding,
    }

    impl Resource for Branch {
        fn uri(&self) -> String {
            "/branch".to_string()
        }

        fn relations(&self) -> Vec<Relation> {
            vec![
                Relation::one("first", self.embedding, Leaf(1)),
                Relation::many("rest", self.embedding, vec![Leaf(2), Leaf(3)]),
            ]
        }
    }

    #[test]
    fn embedded_relations_inline_full_representations() {
        let rendered = represent(&Branch {
            embedding: Embedding::Embed,
        });
        assert_eq!(
            rendered,
            json!({
                "url": "/branch",
                "first": {"url": "/leaves/1", "number": 1},
                "rest": [
                    {"url": "/leaves/2", "number": 2},
                    {"url": "/leaves/3", "number": 3},
                ],
            })
        );
    }

    #[test]
    fn link_only_relations_render_uris_only() {
        let rendered = represent(&Branch {
            embedding: Embedding::LinkOnly,
        });
        assert_eq!(
            rendered,
            json!({
                "url": "/branch",
                "first": "/leaves/1",
                "rest": ["/leaves/2", "/leaves/3"],
            })
        );
    }

    #[test]
    fn collections_embed_their_members() {
        let collection = Collection::new("/leaves", "leaves", vec![Leaf(1), Leaf(2)]);
        let rendered = represent(&collection);
        assert_eq!(
            rendered,
            json!({
                "url": "/leaves",
                "leaves": [
                    {"url": "/leaves/1", "number": 1},
                    {"url": "/leaves/2", "number": 2},
                ],
            })
        );
    }
}
