use crate::model::vin::DecodedVinDto;

/// Make, model and year reported by the VIN decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedVin {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: String,
}

impl DecodedVin {
    pub fn into_dto(self) -> DecodedVinDto {
        DecodedVinDto {
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
        }
    }
}

/// Decoded VIN whose make and model exist in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredVin {
    pub decoded: DecodedVin,
    pub make_id: i32,
    pub model_id: i32,
}
