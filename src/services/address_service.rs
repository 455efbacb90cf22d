use crate::data::models::address::{Address, NewAddress};
use crate::data::repos::implementors::address_repo::AddressRepo;
use crate::services::errors::AddressServiceError;

pub struct AddressService;

impl AddressService {
    pub fn new() -> Self {
        AddressService
    }

    pub async fn get_addresses(&self, user_id: i32) -> Result<Vec<Address>, AddressServiceError> {
        AddressRepo::new()
            .get_by_user(user_id)
            .await
            .map_err(|_| AddressServiceError::Storage)
    }

    /// Saves a new address for the user; every field is required. Returns the
    /// new address id.
    pub async fn save_address(
        &self,
        user_id: i32,
        full_name: &str,
        address_line1: &str,
        city: &str,
        state: &str,
    ) -> Result<i32, AddressServiceError> {
        let full_name = full_name.trim();
        let address_line1 = address_line1.trim();
        let city = city.trim();
        let state = state.trim();

        if full_name.is_empty() || address_line1.is_empty() || city.is_empty() || state.is_empty()
        {
            return Err(AddressServiceError::MissingField);
        }

        AddressRepo::new()
            .add(NewAddress {
                user_id,
                full_name,
                address_line1,
                city,
                state,
            })
            .await
            .map_err(|_| AddressServiceError::Storage)
    }
}

impl Default for AddressService {
    fn default() -> Self {
        Self::new()
    }
}
