//! Make and model catalog domain models.

use crate::model::make::{MakeDto, VehicleModelDto};

/// Vehicle manufacturer with its normalized name.
#[derive(Debug, Clone, PartialEq)]
pub struct Make {
    pub id: i32,
    pub name: String,
}

impl Make {
    pub fn from_entity(entity: entity::make::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }

    pub fn into_dto(self) -> MakeDto {
        MakeDto {
            id: self.id,
            name: self.name,
        }
    }
}

/// Model name belonging to exactly one make.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModel {
    pub id: i32,
    pub name: String,
    pub make_id: i32,
}

impl VehicleModel {
    pub fn from_entity(entity: entity::vehicle_model::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            make_id: entity.make_id,
        }
    }

    pub fn into_dto(self) -> VehicleModelDto {
        VehicleModelDto {
            id: self.id,
            name: self.name,
            make_id: self.make_id,
        }
    }
}
