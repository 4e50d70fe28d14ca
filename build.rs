// Stamps the build date into the crate so exported headers can name the
// exporter build in their `Source` property. `PIX_BUILD_DATE` in the
// environment overrides the stamp for reproducible builds.
fn main() {
    println!("cargo:rerun-if-env-changed=PIX_BUILD_DATE");

    let date = std::env::var("PIX_BUILD_DATE").unwrap_or_else(|_| {
        let now = time::OffsetDateTime::now_utc();
        time::format_description::parse("[year]-[month]-[day]")
            .ok()
            .and_then(|fmt| now.format(&fmt).ok())
            .unwrap_or_else(|| "unknown".to_string())
    });

    println!("cargo:rustc-env=PIX_BUILD_DATE={}", date);
}
