use crate::domain::model::Record;
use crate::utils::error::FieldDerivationWarning;

/// Fields that count as "this contact already has a name".
const NAME_FIELDS: [&str; 3] = ["First Name", "Last Name", "Nickname"];

/// Split candidates, highest priority first.
const SEPARATORS: [char; 4] = ['.', '_', '-', ' '];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredName {
    pub first: String,
    pub last: String,
    pub file_as: String,
}

/// Back-fills `First Name`, `Last Name` and `File As` from the local part of
/// `E-mail 1 - Value` when the record carries no name at all.
pub fn infer_name(record: &Record) -> Record {
    if has_name(record) {
        return record.clone();
    }

    match name_from_email(record.get("E-mail 1 - Value")) {
        Ok(name) => record
            .clone()
            .with("First Name", name.first)
            .with("Last Name", name.last)
            .with("File As", name.file_as),
        Err(warning) => {
            tracing::trace!("Name not inferred: {}", warning);
            record.clone()
        }
    }
}

fn has_name(record: &Record) -> bool {
    NAME_FIELDS
        .iter()
        .any(|field| !record.get(field).trim().is_empty())
}

pub fn name_from_email(email: &str) -> Result<InferredName, FieldDerivationWarning> {
    let local_part = email.split('@').next().unwrap_or("");
    let clean = sanitize(local_part);

    if !clean.chars().any(char::is_alphabetic) {
        return Err(FieldDerivationWarning::NoNameInEmail {
            local_part: local_part.to_string(),
        });
    }

    // 依優先順序找第一個真的能切出片段的分隔符號
    let parts = SEPARATORS
        .iter()
        .filter(|&&sep| clean.contains(sep))
        .map(|&sep| split_segments(&clean, sep))
        .find(|parts| !parts.is_empty());

    let name = match parts {
        Some(parts) => {
            let first = parts[0].clone();
            let last = parts.get(1).cloned().unwrap_or_default();
            let file_as = format!("{} {}", first, last).trim().to_string();
            InferredName { first, last, file_as }
        }
        None => {
            let whole = title_case(&clean);
            InferredName {
                first: whole.clone(),
                last: String::new(),
                file_as: whole,
            }
        }
    };

    Ok(name)
}

/// Keeps letters and the separator characters, then trims.
fn sanitize(local_part: &str) -> String {
    local_part
        .chars()
        .filter(|c| c.is_alphabetic() || SEPARATORS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn split_segments(clean: &str, sep: char) -> Vec<String> {
    clean
        .split(sep)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"o'neil_x"` becomes `"O'Neil_X"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
