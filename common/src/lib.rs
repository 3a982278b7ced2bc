use validator::ValidationErrors;

/// Joins every field error message into one client-facing string.
///
/// Fields are visited in name order so the message is stable across runs.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
