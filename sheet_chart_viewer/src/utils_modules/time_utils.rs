use crate::common::*;

#[doc = "Human-readable local timestamp used on the visualization page"]
pub fn convert_date_to_str_human(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[doc = "Seconds elapsed since `modified`; a timestamp in the future counts as zero"]
pub fn elapsed_secs_since(modified: SystemTime, now: SystemTime) -> u64 {
    now.duration_since(modified)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
