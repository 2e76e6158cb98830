//! Guided three-step prompt flow.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the wizard walks through area, size and carpet area one question at a time
//!
//! Empty input takes the default shown in brackets; `q` cancels. Reader and
//! writer are generic so the flow can be driven from tests.

use std::io::{BufRead, Write};

use crate::domain::{
    BATHROOMS_MAX, BATHROOMS_MIN, BATHROOMS_STEP, BEDROOMS, DEFAULT_BATHROOMS, DEFAULT_BEDROOMS,
    DEFAULT_FLOOR_AREA, FLOOR_AREA_MAX, FLOOR_AREA_MIN, FLOOR_AREA_STEP, PredictionRequest,
};
use crate::error::AppError;
use crate::reference::ReferenceTable;
use crate::report::{format_area_card, format_property_summary};

/// Run the wizard. Returns `None` if the user quits or input ends.
pub fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    table: &ReferenceTable,
) -> Result<Option<PredictionRequest>, AppError> {
    say(output, "Step 1: Select area")?;
    let listing = area_listing(table);
    let Some(area) = ask_until(
        input,
        output,
        "Area name or number (`list` to show all)",
        |s| parse_area_choice(s, table),
        Some(&listing),
    )?
    else {
        return Ok(None);
    };
    if let Some(profile) = table.lookup(&area) {
        say(output, &format_area_card(profile))?;
    }

    say(output, "Step 2: Property size")?;
    let bedrooms_prompt = format!("Bedrooms {}-{} [{DEFAULT_BEDROOMS}]", BEDROOMS.start(), BEDROOMS.end());
    let Some(bedrooms) = ask_until(input, output, &bedrooms_prompt, parse_bedrooms, None)? else {
        return Ok(None);
    };
    let bathrooms_prompt = format!("Bathrooms {BATHROOMS_MIN:.1}-{BATHROOMS_MAX:.1} [{DEFAULT_BATHROOMS:.1}]");
    let Some(bathrooms) = ask_until(input, output, &bathrooms_prompt, parse_bathrooms, None)? else {
        return Ok(None);
    };

    say(output, "Step 3: Carpet area")?;
    let area_prompt = format!("Carpet area {FLOOR_AREA_MIN}-{FLOOR_AREA_MAX} sq ft [{DEFAULT_FLOOR_AREA}]");
    let Some(floor_area) = ask_until(input, output, &area_prompt, parse_floor_area, None)? else {
        return Ok(None);
    };

    let request = PredictionRequest::new(area, bedrooms, bathrooms, floor_area)?;
    say(output, &format_property_summary(&request))?;
    Ok(Some(request))
}

/// Accept a 1-based list number, an exact name, or a case-insensitive exact name.
pub fn parse_area_choice(input: &str, table: &ReferenceTable) -> Result<String, String> {
    if input.is_empty() {
        return Err("Please choose an area.".to_string());
    }
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .map(|p| p.name.clone())
            .ok_or_else(|| format!("Enter a number between 1 and {}.", table.len()));
    }
    if table.contains(input) {
        return Ok(input.to_string());
    }
    table
        .names()
        .find(|name| name.eq_ignore_ascii_case(input))
        .map(str::to_string)
        .ok_or_else(|| format!("Unknown area '{input}'. Type `list` to see all areas."))
}

pub fn parse_bedrooms(input: &str) -> Result<u8, String> {
    if input.is_empty() {
        return Ok(DEFAULT_BEDROOMS);
    }
    input
        .parse::<u8>()
        .ok()
        .filter(|b| BEDROOMS.contains(b))
        .ok_or_else(|| format!("Bedrooms must be a whole number from {} to {}.", BEDROOMS.start(), BEDROOMS.end()))
}

pub fn parse_bathrooms(input: &str) -> Result<f64, String> {
    if input.is_empty() {
        return Ok(DEFAULT_BATHROOMS);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|b| (BATHROOMS_MIN..=BATHROOMS_MAX).contains(b) && (b / BATHROOMS_STEP).fract() == 0.0)
        .ok_or_else(|| {
            format!("Bathrooms must be {BATHROOMS_MIN:.1} to {BATHROOMS_MAX:.1} in steps of {BATHROOMS_STEP}.")
        })
}

pub fn parse_floor_area(input: &str) -> Result<u32, String> {
    if input.is_empty() {
        return Ok(DEFAULT_FLOOR_AREA);
    }
    input
        .replace(',', "")
        .parse::<u32>()
        .ok()
        .filter(|a| (FLOOR_AREA_MIN..=FLOOR_AREA_MAX).contains(a) && a % FLOOR_AREA_STEP == 0)
        .ok_or_else(|| {
            format!("Carpet area must be {FLOOR_AREA_MIN} to {FLOOR_AREA_MAX} sq ft in steps of {FLOOR_AREA_STEP}.")
        })
}

/// Prompt until `parse` accepts. `list` prints `listing` if given.
fn ask_until<R: BufRead, W: Write, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, String>,
    listing: Option<&str>,
) -> Result<Option<T>, AppError> {
    loop {
        write!(output, "{prompt}: ").map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::runtime(format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Ok(None);
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        if let Some(listing) = listing.filter(|_| line.eq_ignore_ascii_case("list")) {
            say(output, listing)?;
            continue;
        }

        match parse(line) {
            Ok(value) => return Ok(Some(value)),
            Err(msg) => say(output, &msg)?,
        }
    }
}

fn area_listing(table: &ReferenceTable) -> String {
    table
        .iter()
        .enumerate()
        .map(|(idx, profile)| format!("{:>3}) {}\n", idx + 1, profile.name))
        .collect()
}

fn say<W: Write>(output: &mut W, text: &str) -> Result<(), AppError> {
    writeln!(output, "{}", text.trim_end()).map_err(write_err)
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::runtime(format!("Failed to write prompt: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drive(script: &str) -> (Option<PredictionRequest>, String) {
        let table = ReferenceTable::builtin();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let request = run_wizard(&mut input, &mut output, &table).unwrap();
        (request, String::from_utf8(output).unwrap())
    }

    #[test]
    fn empty_answers_take_defaults() {
        let (request, out) = drive("Bandra West\n\n\n\n");
        let request = request.unwrap();
        assert_eq!(request.neighborhood(), "Bandra West");
        assert_eq!(request.bedrooms(), 2);
        assert_eq!(request.bathrooms(), 2.0);
        assert_eq!(request.floor_area(), 1000);
        assert!(out.contains("Ultra Premium"));
        assert!(out.contains("Carpet area: 1,000 sq ft"));
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let (request, out) = drive("Atlantis\njuhu\n9\n3\n2.25\n2.5\n1025\n1,250\n");
        let request = request.unwrap();
        assert_eq!(request.neighborhood(), "Juhu");
        assert_eq!(request.bedrooms(), 3);
        assert_eq!(request.bathrooms(), 2.5);
        assert_eq!(request.floor_area(), 1250);
        assert!(out.contains("Unknown area 'Atlantis'"));
        assert!(out.contains("Bedrooms must be"));
    }

    #[test]
    fn quit_and_eof_cancel() {
        assert!(drive("q\n").0.is_none());
        assert!(drive("Juhu\n2\n").0.is_none());
    }

    #[test]
    fn list_shows_numbered_areas() {
        let (request, out) = drive("list\n1\n\n\n\n");
        assert!(out.contains("  1) "));
        let first = ReferenceTable::builtin().get(0).unwrap().name.clone();
        assert_eq!(request.unwrap().neighborhood(), first);
    }

    #[test]
    fn area_numbers_are_one_based() {
        let table = ReferenceTable::builtin();
        assert!(parse_area_choice("0", &table).is_err());
        assert!(parse_area_choice(&(table.len() + 1).to_string(), &table).is_err());
        assert_eq!(parse_area_choice(&table.len().to_string(), &table).unwrap(), "Other");
    }

    #[test]
    fn field_parsers_enforce_form_bounds() {
        assert_eq!(parse_bedrooms("6"), Ok(6));
        assert!(parse_bedrooms("0").is_err());
        assert_eq!(parse_bathrooms("1"), Ok(1.0));
        assert!(parse_bathrooms("5.5").is_err());
        assert_eq!(parse_floor_area("5000"), Ok(5000));
        assert!(parse_floor_area("250").is_err());
        assert!(parse_floor_area("abc").is_err());
    }
}
