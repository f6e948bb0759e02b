/// Characters that are not allowed in file names on common filesystems.
const ILLEGAL: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replace every filesystem-illegal character in `title` with `_`.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| if ILLEGAL.contains(&c) { '_' } else { c })
        .collect()
}

/// Output file name for a chapter, e.g. `01_Intro.pdf`.
pub fn chapter_file_name(order: u32, title: &str) -> String {
    format!("{:02}_{}.pdf", order, sanitize_filename(title))
}
