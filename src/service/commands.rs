use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

static DATE_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date argument pattern"));

const DATA_SPAN_DAYS: i64 = 6;
const EXAM_SPAN_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    /// Today's lessons.
    Plan { day: NaiveDate },
    /// Lessons over a range.
    Data { start: NaiveDate, end: NaiveDate },
    LuckyNumber,
    /// Homework due on `day` (tomorrow).
    Homework { day: NaiveDate },
    Exams { start: NaiveDate, end: NaiveDate },
}

impl BotCommand {
    /// `None` for messages that are not bot commands.
    pub fn parse(text: &str, mentioned: bool, today: NaiveDate) -> Option<Self> {
        if mentioned {
            return Some(BotCommand::Help);
        }
        let args: Vec<&str> = text.split(' ').collect();

        if text.starts_with("!pomoc") {
            Some(BotCommand::Help)
        } else if text.starts_with("!data") {
            let (start, end) = date_args(&args).unwrap_or_else(|| current_week(today));
            let end = end.unwrap_or(start + Duration::days(DATA_SPAN_DAYS));
            Some(BotCommand::Data { start, end })
        } else if text.starts_with("!plan") {
            Some(BotCommand::Plan { day: today })
        } else if text.starts_with("!numerek") {
            Some(BotCommand::LuckyNumber)
        } else if text.starts_with("!zadanie") {
            Some(BotCommand::Homework {
                day: today + Duration::days(1),
            })
        } else if text.starts_with("!testy") {
            let (start, end) = date_args(&args).unwrap_or((today, None));
            let end = end.unwrap_or(start + Duration::days(EXAM_SPAN_DAYS));
            Some(BotCommand::Exams { start, end })
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Help => "!pomoc",
            BotCommand::Plan { .. } => "!plan",
            BotCommand::Data { .. } => "!data",
            BotCommand::LuckyNumber => "!numerek",
            BotCommand::Homework { .. } => "!zadanie",
            BotCommand::Exams { .. } => "!testy",
        }
    }
}

/// `args[1]` as start and optionally `args[2]` as end. A malformed start
/// discards both.
fn date_args(args: &[&str]) -> Option<(NaiveDate, Option<NaiveDate>)> {
    let start = args.get(1).and_then(|arg| parse_date_arg(arg))?;
    let end = args.get(2).and_then(|arg| parse_date_arg(arg));
    Some((start, end))
}

pub fn parse_date_arg(arg: &str) -> Option<NaiveDate> {
    if !DATE_ARG.is_match(arg) {
        return None;
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d").ok()
}

/// Monday of the current week through Sunday.
fn current_week(today: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (monday, Some(monday + Duration::days(DATA_SPAN_DAYS)))
}

pub fn help_message() -> String {
    format!(
        "\n📘 **EduDiscord** v{}\n
**Komendy:**
`!plan` - Plan na dzis
`!data` - Plan na tydzien
`!data RRRR-MM-DD` - Plan od daty
`!numerek` - Szczesliwy numerek
`!zadanie` - Zadania na jutro
`!testy` - Testy (14 dni)
`!pomoc` - Pomoc",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        day(2024, 3, 6)
    }

    #[test]
    fn date_pattern_compiles() {
        assert!(DATE_ARG.is_match("2024-03-06"));
        assert!(!DATE_ARG.is_match("6.03.2024"));
    }

    #[test]
    fn data_defaults_to_current_week() {
        assert_eq!(
            BotCommand::parse("!data", false, today()),
            Some(BotCommand::Data {
                start: day(2024, 3, 4),
                end: day(2024, 3, 10)
            })
        );
        // Sunday still belongs to the week that started on Monday.
        assert_eq!(
            BotCommand::parse("!data", false, day(2024, 3, 10)),
            Some(BotCommand::Data {
                start: day(2024, 3, 4),
                end: day(2024, 3, 10)
            })
        );
    }

    #[test]
    fn data_with_dates() {
        assert_eq!(
            BotCommand::parse("!data 2024-04-01", false, today()),
            Some(BotCommand::Data {
                start: day(2024, 4, 1),
                end: day(2024, 4, 7)
            })
        );
        assert_eq!(
            BotCommand::parse("!data 2024-04-01 2024-04-03", false, today()),
            Some(BotCommand::Data {
                start: day(2024, 4, 1),
                end: day(2024, 4, 3)
            })
        );
        assert_eq!(
            BotCommand::parse("!data 2024-04-01 soon", false, today()),
            Some(BotCommand::Data {
                start: day(2024, 4, 1),
                end: day(2024, 4, 7)
            })
        );
    }

    #[test]
    fn malformed_dates_are_ignored() {
        for text in ["!data 1.04.2024", "!data 2024-4-1", "!data 2024-13-45"] {
            assert_eq!(
                BotCommand::parse(text, false, today()),
                Some(BotCommand::Data {
                    start: day(2024, 3, 4),
                    end: day(2024, 3, 10)
                }),
                "{text}"
            );
        }
    }

    #[test]
    fn exams_default_to_next_fourteen_days() {
        assert_eq!(
            BotCommand::parse("!testy", false, today()),
            Some(BotCommand::Exams {
                start: today(),
                end: day(2024, 3, 20)
            })
        );
        assert_eq!(
            BotCommand::parse("!testy 2024-05-01", false, today()),
            Some(BotCommand::Exams {
                start: day(2024, 5, 1),
                end: day(2024, 5, 15)
            })
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(BotCommand::parse("!plan", false, today()), Some(BotCommand::Plan { day: today() }));
        assert_eq!(BotCommand::parse("!numerek", false, today()), Some(BotCommand::LuckyNumber));
        assert_eq!(
            BotCommand::parse("!zadanie", false, today()),
            Some(BotCommand::Homework { day: day(2024, 3, 7) })
        );
        assert_eq!(BotCommand::parse("!pomoc", false, today()), Some(BotCommand::Help));
        assert_eq!(BotCommand::parse("hello there", true, today()), Some(BotCommand::Help));
        assert_eq!(BotCommand::parse("hello there", false, today()), None);
        assert_eq!(BotCommand::parse(" !plan", false, today()), None);
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_message();
        for name in ["!plan", "!data", "!numerek", "!zadanie", "!testy", "!pomoc"] {
            assert!(help.contains(name), "{name}");
        }
    }
}
