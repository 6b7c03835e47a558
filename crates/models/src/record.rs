use sea_orm::{entity::prelude::*, DatabaseConnection, EntityTrait, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A stored contact entry. Serialized with the public field names
/// (`id`, `name`, `email`, `contact`, `address`, `imageUrl`, `createdAt`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "details")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Text fields accepted on create and update. Presence is the only thing
/// checked: blank strings are stored as-is and omitted fields stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
}

/// Scalars are stored as their text form (`555` becomes `"555"`); `null` is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(LenientText)
}

struct LenientText;

impl<'de> serde::de::Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> { Ok(Some(v.to_string())) }
    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> { Ok(Some(v)) }
    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> { Ok(Some(v.to_string())) }
    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> { Ok(Some(v.to_string())) }
    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> { Ok(Some(v.to_string())) }
    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> { Ok(Some(v.to_string())) }
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> { Ok(None) }
    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> { Ok(None) }

    fn visit_some<D: serde::Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

impl Model {
    /// Build a fresh record with a generated id. `image_url` is `""` when no file was attached.
    pub fn new(fields: RecordFields, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            contact: fields.contact,
            address: fields.address,
            image_url: image_url.unwrap_or_default(),
            created_at: Utc::now().into(),
        }
    }

    /// Overwrite every text field; replace the image only when a new one is given.
    pub fn apply(&mut self, fields: RecordFields, image_url: Option<String>) {
        self.name = fields.name;
        self.email = fields.email;
        self.contact = fields.contact;
        self.address = fields.address;
        if let Some(url) = image_url {
            self.image_url = url;
        }
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn insert(db: &DatabaseConnection, m: Model) -> Result<Model, ModelError> {
    let am: ActiveModel = m.into();
    Ok(am.insert(db).await?)
}

/// Persist all mutable columns of an existing row. `Ok(None)` when the row is gone.
pub async fn save(db: &DatabaseConnection, m: Model) -> Result<Option<Model>, ModelError> {
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        email: Set(m.email),
        contact: Set(m.contact),
        address: Set(m.address),
        image_url: Set(m.image_url),
        ..Default::default()
    };
    match am.update(db).await {
        Ok(updated) => Ok(Some(updated)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete by id; returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> RecordFields {
        RecordFields {
            name: Some(name.into()),
            email: Some("a@x.com".into()),
            contact: Some("555".into()),
            address: Some("1 Main St".into()),
        }
    }

    #[test]
    fn new_record_without_image_has_empty_url() {
        let m = Model::new(fields("Alice"), None);
        assert_eq!(m.image_url, "");
        assert_eq!(m.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn apply_overwrites_text_and_keeps_image_when_absent() {
        let mut m = Model::new(fields("Alice"), Some("/uploads/image-1.png".into()));
        let id = m.id;
        m.apply(RecordFields { name: Some("Alice B.".into()), ..Default::default() }, None);
        assert_eq!(m.id, id);
        assert_eq!(m.name.as_deref(), Some("Alice B."));
        assert_eq!(m.email, None);
        assert_eq!(m.contact, None);
        assert_eq!(m.address, None);
        assert_eq!(m.image_url, "/uploads/image-1.png");
    }

    #[test]
    fn apply_replaces_image_when_given() {
        let mut m = Model::new(fields("Alice"), Some("/uploads/image-1.png".into()));
        m.apply(fields("Alice"), Some("/uploads/image-2.jpg".into()));
        assert_eq!(m.image_url, "/uploads/image-2.jpg");
    }

    #[test]
    fn fields_accept_scalar_json_values_as_text() {
        let f: RecordFields =
            serde_json::from_str(r#"{"name":"Alice","contact":555,"email":null,"address":true}"#).unwrap();
        assert_eq!(f.name.as_deref(), Some("Alice"));
        assert_eq!(f.contact.as_deref(), Some("555"));
        assert_eq!(f.email, None);
        assert_eq!(f.address.as_deref(), Some("true"));

        assert!(serde_json::from_str::<RecordFields>(r#"{"name":{"first":"A"}}"#).is_err());
    }

    #[test]
    fn serializes_with_public_field_names() {
        let m = Model::new(RecordFields { name: Some("Bob".into()), ..Default::default() }, None);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["name"], "Bob");
        assert_eq!(v["imageUrl"], "");
        assert!(v.get("email").is_none());
        assert!(v.get("createdAt").is_some());
        assert_eq!(v["id"], m.id.to_string());
    }
}
