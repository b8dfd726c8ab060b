//! Turns image URLs into stable file names.
use super::format::ImageFormat;

/// Max number of characters kept from the slugified URL.
pub const MAX_NAME_LEN: usize = 128;

/// Builds the name an image is saved with.
///
/// The protocol is dropped, a trailing extension is removed if a dot shows up among the
/// last 5 characters, every character that isn't alphanumeric or `_` becomes `_` and the
/// result is capped at [`MAX_NAME_LEN`] characters before the extension is appended.
///
/// Names without a trailing extension are kept whole. Earlier collectors cut their last
/// character instead, so files saved that way are not matched by the same-size check and
/// get downloaded again.
///
/// ```
/// # use dermis_collector::{filename_for, ImageFormat};
/// assert_eq!(
///     filename_for("https://example.com/img/acne-01.jpeg", ImageFormat::JPG),
///     "example_com_img_acne_01.jpg"
/// );
/// ```
pub fn filename_for(url: &str, format: ImageFormat) -> String {
    let name = match url.find("//") {
        Some(idx) => &url[idx + 2..],
        None => url,
    };

    format!("{}.{}", slugify(strip_extension(name)), format)
}

fn strip_extension(name: &str) -> &str {
    let tail_start = name
        .char_indices()
        .rev()
        .nth(4)
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    match name[tail_start..].find('.') {
        Some(dot) => &name[..tail_start + dot],
        None => name,
    }
}

fn slugify(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .take(MAX_NAME_LEN)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_protocol_and_extension() {
        assert_eq!(
            filename_for("http://www.dermis.net/bilder/CD009/550px/img0001.jpg", ImageFormat::JPG),
            "www_dermis_net_bilder_CD009_550px_img0001.jpg"
        );
    }

    #[test]
    fn keeps_name_without_extension() {
        assert_eq!(
            filename_for("https://cdn.example.org/images/12345", ImageFormat::PNG),
            "cdn_example_org_images_12345.png"
        );
    }

    #[test]
    fn extension_only_looked_up_at_the_end() {
        // The dot in the host name is far from the end and must survive as `_`.
        assert_eq!(
            filename_for("https://a.b/some-long-path", ImageFormat::GIF),
            "a_b_some_long_path.gif"
        );
    }

    #[test]
    fn name_is_capped() {
        let url = format!("https://example.com/{}", "x".repeat(400));
        let name = filename_for(&url, ImageFormat::WEBP);

        assert_eq!(name.len(), MAX_NAME_LEN + ".webp".len());
        assert!(name.starts_with("example_com_x"));
    }

    #[test]
    fn unicode_is_kept() {
        assert_eq!(
            filename_for("https://example.com/ékzéma.png", ImageFormat::PNG),
            "example_com_ékzéma.png"
        );
    }

    #[test]
    fn deterministic() {
        let url = "https://upload.example.org/wiki/Psoriasis_of_back1.jpg?size=large";
        assert_eq!(
            filename_for(url, ImageFormat::JPG),
            filename_for(url, ImageFormat::JPG)
        );
    }
}
