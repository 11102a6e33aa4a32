pub mod commands;
pub mod dates;
pub mod exam_format;
pub mod grouping;
pub mod homework_format;
pub mod lesson_format;
pub mod lucky_number;
pub mod timetable;
pub mod unwrap;
