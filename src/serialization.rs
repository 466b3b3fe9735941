//! Output writers for processed people.
//!
//! JSON output is an array of person objects. CSV output is row-shaped: one
//! row per registration, with the person's fields repeated on each row.

use std::io::Write;

use crate::entity::Entity;
use crate::error::ProcessError;
use crate::person::Person;

/// Header row of the CSV output.
pub const CSV_HEADERS: [&str; 7] = [
    "full_name",
    "email",
    "linked_in_url",
    "live_rego_count",
    "reg_body",
    "reg_number",
    "reg_status",
];

/// JSON array writer
///
/// Writes entities as a pretty-printed JSON array.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Create a new JSON array writer and write the opening bracket
    pub fn new(mut writer: W) -> Result<Self, ProcessError> {
        write!(writer, "[")?;
        Ok(Self {
            writer,
            first: true,
        })
    }

    /// Write a single entity to the JSON array
    pub fn write<T: Entity>(&mut self, entity: &T) -> Result<(), ProcessError> {
        if !self.first {
            write!(self.writer, ",")?;
        }
        self.first = false;

        let json = entity.to_json_pretty()?;
        write!(self.writer, "\n{}", json)?;
        Ok(())
    }

    pub fn write_all<T: Entity>(&mut self, entities: &[T]) -> Result<(), ProcessError> {
        for entity in entities {
            self.write(entity)?;
        }
        Ok(())
    }

    /// Finish writing the array and close the bracket
    pub fn finish(mut self) -> Result<(), ProcessError> {
        writeln!(self.writer, "\n]")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Row-shaped CSV writer for people.
pub struct PersonCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PersonCsvWriter<W> {
    /// Create a new CSV writer and write the header row
    pub fn new(writer: W) -> Result<Self, ProcessError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self { writer })
    }

    /// Write one row per registration. A person without registrations still
    /// gets a row, with the registration cells left empty.
    pub fn write(&mut self, person: &Person) -> Result<(), ProcessError> {
        let live = person.live_rego_count().to_string();
        let linked_in = person.linked_in_url().unwrap_or("");

        if person.registrations().is_empty() {
            self.writer.write_record([
                person.full_name(),
                person.email(),
                linked_in,
                live.as_str(),
                "",
                "",
                "",
            ])?;
            return Ok(());
        }

        for reg in person.registrations() {
            self.writer.write_record([
                person.full_name(),
                person.email(),
                linked_in,
                live.as_str(),
                reg.reg_body().unwrap_or(""),
                reg.reg_number().unwrap_or(""),
                reg.status_message(),
            ])?;
        }
        Ok(())
    }

    pub fn write_all(&mut self, people: &[Person]) -> Result<(), ProcessError> {
        for person in people {
            self.write(person)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn finish(mut self) -> Result<(), ProcessError> {
        self.writer.flush()?;
        Ok(())
    }
}
