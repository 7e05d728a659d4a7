//! Dashboard figures computed from the stored collections.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use parkr_shared::fees;
use parkr_shared::types::BookingStatus;

use crate::store::Store;

/// Days covered by the admin revenue chart, ending today.
const GMV_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGmv {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Sum of every booking's total, whatever its status.
    pub total_gmv: f64,
    pub user_count: usize,
    pub space_count: usize,
    pub active_sessions: usize,
    /// Oldest day first.
    pub daily_gmv: Vec<DailyGmv>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetrics {
    pub gross_revenue: f64,
    pub platform_fee: f64,
    pub net_earnings: f64,
    pub booking_count: usize,
    pub active_spaces: usize,
}

impl Store {
    pub fn admin_stats(&self, today: NaiveDate) -> AdminStats {
        let bookings = self.get_bookings();

        let daily_gmv = (0..GMV_WINDOW_DAYS)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                let value: f64 = bookings
                    .iter()
                    .filter(|b| b.created_at.date_naive() == date)
                    .map(|b| b.total_cost)
                    .sum();
                DailyGmv { date, value }
            })
            .collect();

        AdminStats {
            total_gmv: bookings.iter().map(|b| b.total_cost).sum(),
            user_count: self.get_users().len(),
            space_count: self.get_spaces().len(),
            active_sessions: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Active)
                .count(),
            daily_gmv,
        }
    }

    /// Earnings across every space `owner_id` lists. Cancelled bookings do
    /// not count.
    pub fn host_metrics(&self, owner_id: &str) -> HostMetrics {
        let portfolio = self.spaces_for_owner(owner_id);
        let space_ids: HashSet<&str> = portfolio.iter().map(|s| s.id.as_str()).collect();

        let relevant: Vec<_> = self
            .get_bookings()
            .into_iter()
            .filter(|b| space_ids.contains(b.space_id.as_str()) && b.status != BookingStatus::Cancelled)
            .collect();

        let gross_revenue: f64 = relevant.iter().map(|b| b.total_cost).sum();
        let split = fees::split(gross_revenue);

        HostMetrics {
            gross_revenue,
            platform_fee: split.platform_fee,
            net_earnings: split.host_earnings,
            booking_count: relevant.len(),
            active_spaces: portfolio.iter().filter(|s| s.is_live).count(),
        }
    }
}
