//! Schedule service — personal timetables and the common free-time
//! computation over a workspace's members.

use std::sync::Arc;

use chrono::{Duration, NaiveTime};

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::schedule::ScheduleRepository;
use teamhub_entity::schedule::{FreeTimeSlot, Schedule};

use crate::activity::ActivityService;
use crate::workspace::WorkspaceService;

/// Weekdays considered for team scheduling: Monday through Friday.
const SCHEDULED_DAYS: i32 = 5;
/// Candidate window start.
const DAY_START: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
/// Candidate window end.
const DAY_END: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
/// Gaps shorter than this are not worth meeting in.
const MIN_GAP_MINUTES: i64 = 30;

/// Manages timetables and derives common free time.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    schedules: Arc<ScheduleRepository>,
    workspaces: WorkspaceService,
    activity: ActivityService,
}

impl ScheduleService {
    /// Create a new schedule service.
    pub fn new(
        schedules: Arc<ScheduleRepository>,
        workspaces: WorkspaceService,
        activity: ActivityService,
    ) -> Self {
        Self {
            schedules,
            workspaces,
            activity,
        }
    }

    /// Register a timetable entry for a user.
    pub async fn add(
        &self,
        user_id: i64,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        description: Option<String>,
    ) -> AppResult<Schedule> {
        if !(0..7).contains(&day_of_week) {
            return Err(AppError::validation("day_of_week must be 0..=6"));
        }
        if end_time <= start_time {
            return Err(AppError::validation("end_time must be after start_time"));
        }

        let schedule = self
            .schedules
            .create(
                user_id,
                day_of_week,
                start_time,
                end_time,
                description.as_deref(),
            )
            .await?;

        self.activity
            .log(
                None,
                user_id,
                "SCHEDULE",
                &format!(
                    "registered schedule '{}'",
                    schedule.description.as_deref().unwrap_or("busy")
                ),
            )
            .await;

        Ok(schedule)
    }

    /// List the caller's timetable.
    pub async fn list_mine(&self, user_id: i64) -> AppResult<Vec<Schedule>> {
        self.schedules.find_by_user(user_id).await
    }

    /// Remove a timetable entry. Owners only.
    pub async fn delete(&self, schedule_id: i64, user_id: i64) -> AppResult<()> {
        let schedule = self
            .schedules
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule not found"))?;

        if schedule.user_id != user_id {
            return Err(AppError::authorization("Only the owner can delete this"));
        }

        self.schedules.delete(schedule_id).await
    }

    /// The weekday gaps shared by every member of a workspace. Members
    /// only.
    pub async fn workspace_free_time(
        &self,
        workspace_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<FreeTimeSlot>> {
        self.workspaces.require_member(workspace_id, user_id).await?;

        let member_ids = self.workspaces.member_user_ids(workspace_id).await?;
        if member_ids.is_empty() {
            return Err(AppError::not_found("Workspace has no members"));
        }

        let schedules = self.schedules.find_by_users(&member_ids).await?;
        Ok(common_free_slots(&schedules))
    }
}

/// Compute the gaps left between 09:00 and 22:00 on Monday–Friday once
/// every given busy block is subtracted. Gaps shorter than 30 minutes
/// are dropped.
pub fn common_free_slots(schedules: &[Schedule]) -> Vec<FreeTimeSlot> {
    let min_gap = Duration::minutes(MIN_GAP_MINUTES);
    let mut slots = Vec::new();

    for day in 0..SCHEDULED_DAYS {
        let mut busy: Vec<(NaiveTime, NaiveTime)> = schedules
            .iter()
            .filter(|s| s.day_of_week == day)
            .map(|s| (s.start_time, s.end_time))
            .collect();
        busy.sort();

        let mut cursor = DAY_START;
        for (start, end) in busy {
            if start > cursor + min_gap {
                slots.push(FreeTimeSlot {
                    day_of_week: day,
                    start_time: cursor,
                    end_time: start,
                });
            }
            if end > cursor {
                cursor = end;
            }
        }

        if DAY_END > cursor + min_gap {
            slots.push(FreeTimeSlot {
                day_of_week: day,
                start_time: cursor,
                end_time: DAY_END,
            });
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn busy(day: i32, start: NaiveTime, end: NaiveTime) -> Schedule {
        Schedule {
            id: 0,
            user_id: 1,
            day_of_week: day,
            start_time: start,
            end_time: end,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_timetable_leaves_whole_days_free() {
        let slots = common_free_slots(&[]);
        assert_eq!(slots.len(), 5);
        for (day, slot) in slots.iter().enumerate() {
            assert_eq!(slot.day_of_week, day as i32);
            assert_eq!(slot.start_time, t(9, 0));
            assert_eq!(slot.end_time, t(22, 0));
        }
    }

    #[test]
    fn single_block_splits_the_day() {
        let slots = common_free_slots(&[busy(0, t(12, 0), t(14, 0))]);
        let monday: Vec<_> = slots.iter().filter(|s| s.day_of_week == 0).collect();
        assert_eq!(monday.len(), 2);
        assert_eq!(
            (monday[0].start_time, monday[0].end_time),
            (t(9, 0), t(12, 0))
        );
        assert_eq!(
            (monday[1].start_time, monday[1].end_time),
            (t(14, 0), t(22, 0))
        );
    }

    #[test]
    fn overlapping_blocks_from_different_members_merge() {
        let slots = common_free_slots(&[
            busy(2, t(10, 0), t(13, 0)),
            busy(2, t(12, 0), t(15, 0)),
        ]);
        let wednesday: Vec<_> = slots.iter().filter(|s| s.day_of_week == 2).collect();
        assert_eq!(wednesday.len(), 2);
        assert_eq!(
            (wednesday[0].start_time, wednesday[0].end_time),
            (t(9, 0), t(10, 0))
        );
        assert_eq!(
            (wednesday[1].start_time, wednesday[1].end_time),
            (t(15, 0), t(22, 0))
        );
    }

    #[test]
    fn short_gaps_are_dropped() {
        // 20-minute gap between the blocks, below the 30-minute floor.
        let slots = common_free_slots(&[
            busy(1, t(9, 0), t(12, 0)),
            busy(1, t(12, 20), t(22, 0)),
        ]);
        assert!(slots.iter().all(|s| s.day_of_week != 1));
    }

    #[test]
    fn blocks_outside_the_window_are_clamped() {
        // Early lecture ends before the window opens; evening block runs
        // past it. Only the middle remains free.
        let slots = common_free_slots(&[
            busy(4, t(7, 0), t(8, 30)),
            busy(4, t(18, 0), t(23, 0)),
        ]);
        let friday: Vec<_> = slots.iter().filter(|s| s.day_of_week == 4).collect();
        assert_eq!(friday.len(), 1);
        assert_eq!(
            (friday[0].start_time, friday[0].end_time),
            (t(9, 0), t(18, 0))
        );
    }

    #[test]
    fn weekend_blocks_are_ignored() {
        let slots = common_free_slots(&[busy(6, t(9, 0), t(22, 0))]);
        // Saturday/Sunday never appear; weekdays stay fully free.
        assert_eq!(slots.len(), 5);
        assert!(slots.iter().all(|s| s.day_of_week < 5));
    }
}
