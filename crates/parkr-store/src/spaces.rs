use parkr_shared::constants::SPACES_KEY;

use crate::error::Result;
use crate::models::ParkingSpace;
use crate::store::Store;

impl Store {
    pub fn get_spaces(&self) -> Vec<ParkingSpace> {
        self.collection(SPACES_KEY)
    }

    /// Replace the whole space collection.
    pub fn set_spaces(&self, spaces: &[ParkingSpace]) -> Result<()> {
        self.set(SPACES_KEY, spaces)
    }

    /// Replace the space with the same id, or append it.
    pub fn save_space(&self, space: ParkingSpace) -> Result<()> {
        let mut spaces = self.get_spaces();
        match spaces.iter().position(|s| s.id == space.id) {
            Some(idx) => spaces[idx] = space,
            None => spaces.push(space),
        }
        self.set_spaces(&spaces)
    }

    pub fn find_space(&self, id: &str) -> Option<ParkingSpace> {
        self.get_spaces().into_iter().find(|s| s.id == id)
    }

    /// Spaces listed by one host.
    pub fn spaces_for_owner(&self, owner_id: &str) -> Vec<ParkingSpace> {
        self.get_spaces()
            .into_iter()
            .filter(|s| s.owner_id == owner_id)
            .collect()
    }

    /// Live spaces whose address or city contains `query`, ignoring case.
    /// An empty query matches every live space.
    pub fn search_spaces(&self, query: &str) -> Vec<ParkingSpace> {
        let needle = query.trim().to_lowercase();
        self.get_spaces()
            .into_iter()
            .filter(|s| s.is_live)
            .filter(|s| {
                needle.is_empty()
                    || s.address.to_lowercase().contains(&needle)
                    || s.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Change one space's hourly rate. Returns `false` if it does not exist.
    pub fn set_space_rate(&self, space_id: &str, hourly_rate: f64) -> Result<bool> {
        let mut spaces = self.get_spaces();
        let Some(space) = spaces.iter_mut().find(|s| s.id == space_id) else {
            return Ok(false);
        };
        space.hourly_rate = hourly_rate;
        self.set_spaces(&spaces)?;
        Ok(true)
    }
}
