use crate::types::{PrefillPayload, ToolInvocationArgs, DEFAULT_COUNTRY};

/// Turns whatever the caller knew into a fully keyed pre-fill.
///
/// Values are copied as given: no trimming, no case folding. Only `country`
/// has a fallback.
///
/// Present-but-empty values (`""`, `0`) are kept, not nulled: `country: ""`
/// stays `""` and does not fall back to [`DEFAULT_COUNTRY`].
pub fn compose_prefill(args: &ToolInvocationArgs) -> PrefillPayload {
    PrefillPayload {
        form_type: args.form_type,
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        country: args
            .country
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        city: args.city.clone(),
        state: args.state.clone(),
        address: args.address.clone(),
        zip_code: args.zip_code.clone(),
        annual_income: args.annual_income.clone(),
        employment_status: args.employment_status,
    }
}
