use crate::capacity::{analyze_grid, CapacityAnalysis};
use crate::carrier::load_carrier;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Analyze the hiding capacity of an image file
pub fn analyze_image(path: &Path) -> Result<CapacityAnalysis> {
    let grid = load_carrier(path)?;
    Ok(analyze_grid(&grid))
}

/// Capacity report as pretty JSON
pub fn show_info_json(path: &Path) -> Result<String> {
    let analysis = analyze_image(path)?;
    Ok(serde_json::to_string_pretty(&analysis)? + "\n")
}

/// Display capacity information about an image
pub fn show_info(path: &Path) -> Result<String> {
    let analysis = analyze_image(path)?;
    let file_size = fs::metadata(path)?.len();

    let mut output = String::new();

    output.push_str("lsbvault Carrier Information\n");
    output.push_str("============================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Size: {}\n", format_size(file_size)));
    output.push_str(&format!(
        "Dimensions: {} x {}\n",
        analysis.width, analysis.height
    ));
    output.push('\n');

    output.push_str("Capacity:\n");
    output.push_str(&format!(
        "  Carrier bits: {} (1 per pixel, red channel)\n",
        analysis.available_bits
    ));
    output.push_str(&format!("  Header bits: {}\n", analysis.header_bits));
    output.push_str(&format!(
        "  Max envelope: {}\n",
        format_size(analysis.max_envelope_bytes as u64)
    ));
    match analysis.max_message_bytes {
        Some(max) => output.push_str(&format!("  Max message: {} bytes\n", max)),
        None => output.push_str("  Max message: none (image too small)\n"),
    }

    Ok(output)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.png");
        RgbaImage::new(100, 100).save(&path).unwrap();

        let info = show_info(&path).unwrap();
        assert!(info.contains("Dimensions: 100 x 100"));
        assert!(info.contains("Carrier bits: 10000"));
        assert!(info.contains("Header bits: 64"));
        assert!(info.contains("Max message: 591 bytes"));
    }

    #[test]
    fn test_show_info_small_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        RgbaImage::new(10, 10).save(&path).unwrap();

        let info = show_info(&path).unwrap();
        assert!(info.contains("Max message: none"));
    }

    #[test]
    fn test_show_info_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.png");
        RgbaImage::new(100, 100).save(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&show_info_json(&path).unwrap()).unwrap();
        assert_eq!(json["available_bits"], 10000);
        assert_eq!(json["max_message_bytes"], 591);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
    }
}
