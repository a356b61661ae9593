//! Text and link formatting for sharing a proposal.
//!
//! Everything here formats results that were already computed; nothing is
//! rescored.

use chrono::{DateTime, Utc};
use url::form_urlencoded;

use crate::error::Result;
use crate::participant::Participant;
use crate::proposal::MeetingProposal;
use crate::suitability::SuitabilityLevel;
use crate::zone::local_date_time_string;

const GOOGLE_CALENDAR_RENDER: &str = "https://calendar.google.com/calendar/render";

/// `45m`, `1h`, `1h 30m`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Plain-text summary listing each participant's local time.
///
/// Participants are listed in the order given. A participant without a
/// stored score (added after the proposal) is marked ❌.
///
/// # Errors
///
/// Fails if a participant's time zone is not a recognized IANA name.
pub fn meeting_text(proposal: &MeetingProposal, participants: &[Participant]) -> Result<String> {
    let mut lines = vec![
        format!("📅 {}", proposal.display_title()),
        format!("⏰ Duration: {}", format_duration(proposal.duration_minutes)),
        String::new(),
        "🌍 Time for each participant:".to_string(),
    ];

    for participant in participants {
        let local = local_date_time_string(proposal.date_time, &participant.time_zone)?;
        let mark = match proposal.score_for(&participant.id).map(|s| s.level) {
            Some(SuitabilityLevel::Optimal) => "✅",
            Some(SuitabilityLevel::Acceptable) => "⚠️",
            _ => "❌",
        };
        let line = match &participant.flag {
            Some(flag) => format!("{mark} {flag} {}: {local}", participant.name),
            None => format!("{mark} {}: {local}", participant.name),
        };
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// A Google Calendar "add event" link carrying the summary as details.
pub fn google_calendar_url(proposal: &MeetingProposal, participants: &[Participant]) -> Result<String> {
    let details = meeting_text(proposal, participants)?;
    let dates = format!(
        "{}/{}",
        calendar_stamp(proposal.date_time),
        calendar_stamp(proposal.end_time())
    );

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("action", "TEMPLATE")
        .append_pair("text", proposal.display_title())
        .append_pair("dates", &dates)
        .append_pair("details", &details)
        .finish();

    Ok(format!("{GOOGLE_CALENDAR_RENDER}?{query}"))
}

/// `meeting-2024-07-15-1800.txt`, stamped in UTC.
pub fn download_file_name(proposal: &MeetingProposal) -> String {
    format!("meeting-{}.txt", proposal.date_time.format("%Y-%m-%d-%H%M"))
}

fn calendar_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use url::Url;

    fn team() -> Vec<Participant> {
        let mut ana = Participant::new("ny", "Ana", "America/New_York");
        ana.flag = Some("🇺🇸".to_string());
        let tom = Participant::new("ldn", "Tom", "Europe/London");
        let mut kenji = Participant::new("tk", "Kenji", "Asia/Tokyo");
        kenji.flag = Some("🇯🇵".to_string());
        vec![ana, tom, kenji]
    }

    fn proposal(title: Option<&str>) -> MeetingProposal {
        // Monday 2024-07-15 14:00 EDT
        let when = Utc.with_ymd_and_hms(2024, 7, 15, 18, 0, 0).unwrap();
        MeetingProposal::new("p1", when, 90, &team(), title.map(String::from)).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(180), "3h");
    }

    #[test]
    fn test_meeting_text() {
        let text = meeting_text(&proposal(Some("Roadmap")), &team()).unwrap();
        let expected = [
            "📅 Roadmap",
            "⏰ Duration: 1h 30m",
            "",
            "🌍 Time for each participant:",
            "✅ 🇺🇸 Ana: Jul 15, 2024 14:00",
            "⚠️ Tom: Jul 15, 2024 19:00",
            "❌ 🇯🇵 Kenji: Jul 16, 2024 03:00",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_meeting_text_default_title_and_unscored_participant() {
        let mut people = team();
        people.push(Participant::new("sf", "Lee", "America/Los_Angeles"));
        let text = meeting_text(&proposal(None), &people).unwrap();
        assert!(text.starts_with("📅 Meeting\n"));
        assert!(text.ends_with("❌ Lee: Jul 15, 2024 11:00"), "got: {text}");
    }

    #[test]
    fn test_meeting_text_invalid_zone() {
        let people = vec![Participant::new("x", "X", "Not/AZone")];
        assert!(meeting_text(&proposal(None), &people).is_err());
    }

    #[test]
    fn test_google_calendar_url() {
        let url = google_calendar_url(&proposal(Some("Roadmap sync")), &team()).unwrap();
        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("text=Roadmap+sync"), "got: {url}");
        assert!(url.contains("dates=20240715T180000Z%2F20240715T193000Z"), "got: {url}");
        assert!(url.contains("details="), "got: {url}");

        let parsed = Url::parse(&url).unwrap();
        let details = parsed
            .query_pairs()
            .find(|(k, _)| k == "details")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(details.contains("Kenji: Jul 16, 2024 03:00"));
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name(&proposal(None)), "meeting-2024-07-15-1800.txt");
    }
}
