//! Text, CSV, and JSON renderings of a wind triangle solution.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Human-readable summary rounded to one decimal place.
pub mod report {
    use std::fmt::Write;

    use tas_solver::SolutionResult;

    /// Render a solution as the classic three-line flight-test summary.
    pub fn render_text(name: &str, unit: &str, result: &SolutionResult) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== {name} ===");
        let _ = writeln!(out, "True airspeed : {:.1} {unit}", result.true_airspeed);
        for (idx, heading) in result.headings.iter().enumerate() {
            let _ = writeln!(out, "Heading leg {} : {:.1}°", idx + 1, heading);
        }
        let _ = writeln!(
            out,
            "Wind          : from {:.1}° at {:.1} {unit}",
            result.wind.from_deg, result.wind.speed
        );
        out
    }
}

/// CSV rows, one per solved flight test.
pub mod csv {
    use std::io::{self, Write};

    use ::csv::{QuoteStyle, WriterBuilder};
    use tas_solver::SolutionResult;

    const HEADER: [&str; 9] = [
        "name",
        "units",
        "tas",
        "heading_1_deg",
        "heading_2_deg",
        "heading_3_deg",
        "wind_from_deg",
        "wind_speed",
        "airspeed_spread",
    ];

    fn row_writer(writer: &mut dyn Write) -> ::csv::Writer<&mut dyn Write> {
        WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer)
    }

    /// Write the standard CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        let mut out = row_writer(writer);
        out.write_record(HEADER)?;
        out.flush()
    }

    /// CSV row emitted by the exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub name: &'a str,
        pub units: &'a str,
        pub result: &'a SolutionResult,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the header ordering.
        ///
        /// Names containing commas or quotes are quoted.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let r = self.result;
            let mut out = row_writer(writer);
            out.write_record([
                self.name.to_string(),
                self.units.to_string(),
                format!("{:.6}", r.true_airspeed),
                format!("{:.6}", r.headings[0]),
                format!("{:.6}", r.headings[1]),
                format!("{:.6}", r.headings[2]),
                format!("{:.6}", r.wind.from_deg),
                format!("{:.6}", r.wind.speed),
                format!("{:.3e}", r.airspeed_spread),
            ])?;
            out.flush()
        }
    }
}

/// JSON summaries for downstream tooling.
pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    use tas_solver::SolutionResult;

    /// Wind block of the JSON summary.
    #[derive(Debug, Clone, Serialize)]
    pub struct WindSummary {
        pub from_deg: f64,
        pub speed: f64,
        /// East/north components of the air-mass velocity.
        pub vector: [f64; 2],
    }

    /// Envelope of one solved flight test.
    #[derive(Debug, Clone, Serialize)]
    pub struct Summary<'a> {
        pub name: &'a str,
        pub units: &'a str,
        pub true_airspeed: f64,
        pub headings_deg: [f64; 3],
        pub wind: WindSummary,
        pub airspeed_spread: f64,
    }

    impl<'a> Summary<'a> {
        pub fn new(name: &'a str, units: &'a str, result: &SolutionResult) -> Self {
            Self {
                name,
                units,
                true_airspeed: result.true_airspeed,
                headings_deg: result.headings,
                wind: WindSummary {
                    from_deg: result.wind.from_deg,
                    speed: result.wind.speed,
                    vector: result.wind.vector,
                },
                airspeed_spread: result.airspeed_spread,
            }
        }
    }

    /// Write a pretty-printed JSON summary followed by a newline.
    pub fn write_json(writer: &mut dyn Write, summary: &Summary<'_>) -> io::Result<()> {
        to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)
    }
}
