use serde::{Deserialize, Serialize};

/// One user's visit to one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedLocation {
    pub id: i32,
    pub user_id: i32,
    pub location_id: i32,
    pub points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVisit {
    pub user_id: i32,
    pub location_id: i32,
    pub points: i32,
}

impl NewVisit {
    pub fn new(user_id: i32, location_id: i32) -> NewVisit {
        NewVisit {
            user_id,
            location_id,
            points: 0,
        }
    }

    pub fn with_points(self, points: i32) -> NewVisit {
        NewVisit { points, ..self }
    }
}

/// Fields to overwrite on an existing visit; `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitChanges {
    pub location_id: Option<i32>,
    pub user_id: Option<i32>,
    pub points: Option<i32>,
}

impl VisitChanges {
    pub fn is_empty(&self) -> bool {
        self.location_id.is_none() && self.user_id.is_none() && self.points.is_none()
    }

    pub fn apply(&self, visit: &mut VisitedLocation) {
        if let Some(location_id) = self.location_id {
            visit.location_id = location_id;
        }
        if let Some(user_id) = self.user_id {
            visit.user_id = user_id;
        }
        if let Some(points) = self.points {
            visit.points = points;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(with = "picture_base64")]
    pub picture: Option<Vec<u8>>,
}

/// Pictures travel as base64 strings in JSON.
mod picture_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(picture: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match picture {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD.decode(encoded).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visit_serializes_with_camel_case_keys() {
        let visit = VisitedLocation {
            id: 7,
            user_id: 1,
            location_id: 2,
            points: 0,
        };
        assert_eq!(
            serde_json::to_value(&visit).unwrap(),
            json!({"id": 7, "userId": 1, "locationId": 2, "points": 0})
        );
    }

    #[test]
    fn changes_only_touch_given_fields() {
        let mut visit = VisitedLocation {
            id: 3,
            user_id: 1,
            location_id: 2,
            points: 0,
        };
        let changes = VisitChanges {
            points: Some(5),
            ..VisitChanges::default()
        };
        assert!(!changes.is_empty());
        changes.apply(&mut visit);
        assert_eq!(visit.user_id, 1);
        assert_eq!(visit.location_id, 2);
        assert_eq!(visit.points, 5);
    }

    #[test]
    fn picture_is_base64_in_json() {
        let user = User {
            id: 1,
            name: "Jane Doe".to_string(),
            email: "jane@doe.org".to_string(),
            picture: Some(vec![0xff, 0xd8, 0xff]),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["picture"], json!("/9j/"));

        let back: User = serde_json::from_value(value).unwrap();
        assert_eq!(back, user);

        let no_picture: User = serde_json::from_value(
            json!({"id": 2, "name": "John Doe", "email": "john@doe.org", "picture": null}),
        )
        .unwrap();
        assert_eq!(no_picture.picture, None);
    }
}
