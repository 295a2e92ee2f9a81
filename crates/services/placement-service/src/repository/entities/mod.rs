//! SeaORM entities. Embedded documents round-trip through `serde_json`.

pub mod announcement;
pub mod company_profile;
pub mod job;
pub mod offer;
pub mod resume;
pub mod student_profile;
pub mod user;

use sea_orm::{prelude::Json, DbErr};
use serde::{de::DeserializeOwned, Serialize};

pub(crate) fn from_json<T: DeserializeOwned>(value: Json, column: &str) -> Result<T, DbErr> {
    serde_json::from_value(value).map_err(|e| DbErr::Json(format!("{column}: {e}")))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Json, DbErr> {
    serde_json::to_value(value).map_err(|e| DbErr::Json(e.to_string()))
}

/// Unit-variant enums are stored by their wire name ("Open", "Not Placed").
pub(crate) fn enum_to_string<T: Serialize>(value: &T) -> Result<String, DbErr> {
    match to_json(value)? {
        Json::String(s) => Ok(s),
        other => Err(DbErr::Json(format!("expected string tag, got {other}"))),
    }
}

pub(crate) fn enum_from_string<T: DeserializeOwned>(value: String, column: &str) -> Result<T, DbErr> {
    from_json(Json::String(value), column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{JobStatus, PlacementStatus};

    #[test]
    fn test_enum_tags() {
        assert_eq!(enum_to_string(&PlacementStatus::NotPlaced).unwrap(), "Not Placed");
        let status: JobStatus = enum_from_string("Filled".to_string(), "status").unwrap();
        assert_eq!(status, JobStatus::Filled);
    }

    #[test]
    fn test_bad_json_names_column() {
        let err = from_json::<Vec<String>>(Json::Bool(true), "skills").unwrap_err();
        assert!(err.to_string().contains("skills"));
    }
}
