use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::domain::repository::NotificationRepository;
use crate::domain::types::{FarmContext, NotificationCounts};
use crate::error::FarmsServiceError;

/// Asia/Bangkok has no DST; a fixed +07:00 bounds the farm's calendar day.
const BANGKOK_OFFSET_HOURS: i64 = 7;

/// `[start of today, start of tomorrow)` in Bangkok time, expressed in UTC.
pub fn bangkok_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let offset = TimeDelta::hours(BANGKOK_OFFSET_HOURS);
    let local_midnight = (now + offset).date_naive().and_time(NaiveTime::MIN);
    let start = local_midnight.and_utc() - offset;
    (start, start + TimeDelta::days(1))
}

pub struct NotificationCountUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> NotificationCountUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        now: DateTime<Utc>,
    ) -> Result<NotificationCounts, FarmsServiceError> {
        let (_, tomorrow) = bangkok_day_bounds(now);
        let overdue = self.repo.count_overdue(context.farm_id(), now).await?;
        let due_today = self
            .repo
            .count_pending_due_between(context.farm_id(), now, tomorrow)
            .await?;
        Ok(NotificationCounts::new(overdue, due_today))
    }
}
