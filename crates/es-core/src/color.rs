/// Lightness HLS d'une couleur RGB [0,255] → L ∈ [0.0, 1.0].
///
/// `L = (max + min) / 2` sur les canaux normalisés.
///
/// # Example
/// ```
/// use es_core::color::hls_lightness;
/// assert_eq!(hls_lightness(0, 0, 0), 0.0);
/// assert_eq!(hls_lightness(255, 255, 255), 1.0);
/// assert!((hls_lightness(255, 0, 0) - 0.5).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn hls_lightness(r: u8, g: u8, b: u8) -> f32 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    (f32::from(max) + f32::from(min)) / (2.0 * 255.0)
}

/// True for pure black, `r + g + b == 0`.
#[inline(always)]
#[must_use]
pub fn is_black(r: u8, g: u8, b: u8) -> bool {
    u16::from(r) + u16::from(g) + u16::from(b) == 0
}

/// Parse `"R,G,B"` into a color.
///
/// # Example
/// ```
/// use es_core::color::parse_rgb;
/// assert_eq!(parse_rgb("255, 128,0"), Some([255, 128, 0]));
/// assert_eq!(parse_rgb("255,128"), None);
/// ```
#[must_use]
pub fn parse_rgb(s: &str) -> Option<[u8; 3]> {
    parse_channels::<3>(s)
}

/// Parse `"R,G,B,A"` into a color.
///
/// # Example
/// ```
/// use es_core::color::parse_rgba;
/// assert_eq!(parse_rgba("3,46,58,255"), Some([3, 46, 58, 255]));
/// assert_eq!(parse_rgba("3,46,58,256"), None);
/// ```
#[must_use]
pub fn parse_rgba(s: &str) -> Option<[u8; 4]> {
    parse_channels::<4>(s)
}

fn parse_channels<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut parts = s.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lightness_of_mid_gray() {
        let l = hls_lightness(128, 128, 128);
        assert!((l - 0.501_96).abs() < 1e-4, "l = {l}");
    }

    #[test]
    fn lightness_ignores_middle_channel() {
        assert_eq!(hls_lightness(10, 200, 90), hls_lightness(10, 200, 150));
    }

    #[test]
    fn black_detection() {
        assert!(is_black(0, 0, 0));
        assert!(!is_black(0, 0, 1));
        assert!(!is_black(255, 255, 255));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_rgb("a,b,c"), None);
        assert_eq!(parse_rgb("1,2,3,4"), None);
        assert_eq!(parse_rgba("1,2,3"), None);
        assert_eq!(parse_rgb(""), None);
    }
}
