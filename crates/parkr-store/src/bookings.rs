use chrono::{DateTime, Duration, Utc};

use parkr_shared::codes::{access_code, new_record_id};
use parkr_shared::constants::{BOOKINGS_KEY, BOOKING_WINDOW_SECS};
use parkr_shared::fees;
use parkr_shared::types::BookingStatus;

use crate::error::Result;
use crate::models::{Booking, ParkingSpace};
use crate::store::Store;

impl Store {
    pub fn get_bookings(&self) -> Vec<Booking> {
        self.collection(BOOKINGS_KEY)
    }

    /// Replace the booking with the same id, or append it.
    pub fn save_booking(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.get_bookings();
        match bookings.iter().position(|b| b.id == booking.id) {
            Some(idx) => bookings[idx] = booking,
            None => bookings.push(booking),
        }
        self.set(BOOKINGS_KEY, &bookings)
    }

    pub fn find_booking(&self, id: &str) -> Option<Booking> {
        self.get_bookings().into_iter().find(|b| b.id == id)
    }

    pub fn bookings_for_parker(&self, parker_id: &str) -> Vec<Booking> {
        self.get_bookings()
            .into_iter()
            .filter(|b| b.parker_id == parker_id)
            .collect()
    }

    /// Book one hour of `space` for `parker_id` starting at `now`.
    ///
    /// The total is the space's hourly rate, split 20/80 between platform and
    /// host. The booking starts in escrow with a fresh gate code.
    pub fn create_booking(
        &self,
        space: &ParkingSpace,
        parker_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Booking> {
        let total = space.hourly_rate;
        let split = fees::split(total);

        let booking = Booking {
            id: new_record_id(),
            space_id: space.id.clone(),
            parker_id: parker_id.to_string(),
            start_time: now,
            end_time: now + Duration::seconds(BOOKING_WINDOW_SECS),
            total_cost: total,
            platform_fee: split.platform_fee,
            host_earnings: split.host_earnings,
            status: BookingStatus::EscrowAuthorized,
            payment_intent_id: None,
            created_at: now,
            access_code: access_code(&mut rand::thread_rng()),
            full_address: space.address.clone(),
        };

        self.save_booking(booking.clone())?;
        tracing::info!(booking_id = %booking.id, space_id = %space.id, parker_id, "booking authorised");
        Ok(booking)
    }

    /// Overwrite a booking's status. Any transition is accepted.
    pub fn set_booking_status(&self, booking_id: &str, status: BookingStatus) -> Result<Option<Booking>> {
        let Some(mut booking) = self.find_booking(booking_id) else {
            return Ok(None);
        };
        booking.status = status;
        self.save_booking(booking.clone())?;
        Ok(Some(booking))
    }
}
