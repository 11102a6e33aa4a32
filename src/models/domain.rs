/// The three list-shaped payloads the provider returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Lessons,
    Homework,
    Exams,
}

impl Domain {
    /// Wrapper keys tried, in order, before falling back to key scanning.
    pub fn envelope_keys(self) -> &'static [&'static str] {
        match self {
            Domain::Lessons => &["Envelope", "Lessons", "Data"],
            Domain::Homework => &["Homework", "Data", "Envelope"],
            Domain::Exams => &["Envelope", "Exams", "Data"],
        }
    }

    /// Only lessons require the scanned array to look like lessons.
    pub fn guards_fallback_shape(self) -> bool {
        matches!(self, Domain::Lessons)
    }

    pub fn no_data_message(self) -> &'static str {
        match self {
            Domain::Lessons => "❌ Nie otrzymano danych o lekcjach.",
            Domain::Homework => "❌ Nie otrzymano danych o zadaniach.",
            Domain::Exams => "❌ Nie otrzymano danych o testach.",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            Domain::Lessons => "❌ Nie znaleziono lekcji dla podanego zakresu dat.",
            Domain::Homework => "❌ Nie znaleziono zadan domowych.",
            Domain::Exams => "❌ Nie znaleziono testow.",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::Lessons => "lessons",
            Domain::Homework => "homework",
            Domain::Exams => "exams",
        }
    }
}
