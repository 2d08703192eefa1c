//! Embeds the build date and time for `gltf-cli version`.

use time::OffsetDateTime;

/// Env override, else `now` rendered with `pattern`.
fn stamp(var: &str, now: OffsetDateTime, pattern: &str) -> String {
    println!("cargo:rerun-if-env-changed={var}");
    if let Ok(value) = std::env::var(var) {
        return value;
    }
    time::format_description::parse(pattern)
        .ok()
        .and_then(|fmt| now.format(&fmt).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let now = OffsetDateTime::now_utc();
    let date = stamp("GLTF_BUILD_DATE", now, "[year]-[month]-[day]");
    let time = stamp("GLTF_BUILD_TIME", now, "[hour]:[minute]:[second]");
    println!("cargo:rustc-env=GLTF_BUILD_DATE={date}");
    println!("cargo:rustc-env=GLTF_BUILD_TIME={time}");
}
