use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `REGISTRAR_QUIET=1` silences confirmations and banners; errors still show
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("REGISTRAR_QUIET")
            .map(|v| quiet_value(&v))
            .unwrap_or(false)
    })
}

fn quiet_value(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}
