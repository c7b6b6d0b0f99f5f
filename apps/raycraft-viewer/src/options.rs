//! Viewer command-line options.

use raycraft_render::ScreenDetail;
use raycraft_world::WorldSeed;

/// World and render settings from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Fixed world seed; a random one is drawn when absent.
    pub seed: Option<WorldSeed>,
    pub detail: ScreenDetail,
    pub shadows: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            seed: None,
            detail: ScreenDetail::default(),
            shadows: true,
        }
    }
}

impl ViewerOptions {
    /// Parse from a slice of arguments; the first entry is the program name.
    ///
    /// Unknown arguments and unparsable values are ignored.
    pub fn parse(args: &[String]) -> Self {
        let mut options = Self::default();

        let mut rest = args.iter().skip(1);
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--seed" => {
                    if let Some(seed) = rest.next().and_then(|v| v.parse().ok()) {
                        options.seed = Some(seed);
                    }
                }
                "--detail" => {
                    if let Some(level) = rest.next().and_then(|v| v.parse().ok()) {
                        options.detail = ScreenDetail::new(level);
                    }
                }
                "--no-shadows" => options.shadows = false,
                _ => {}
            }
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> ViewerOptions {
        let args: Vec<String> = std::iter::once("raycraft-viewer")
            .chain(list.iter().copied())
            .map(String::from)
            .collect();
        ViewerOptions::parse(&args)
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]), ViewerOptions::default());
        assert_eq!(parse(&["-S", "--exit-after"]), ViewerOptions::default());
    }

    #[test]
    fn all_flags() {
        let options = parse(&["--seed", "-12345", "--detail", "4", "--no-shadows"]);
        assert_eq!(options.seed, Some(-12345));
        assert_eq!(options.detail.level(), 4);
        assert!(!options.shadows);
    }

    #[test]
    fn detail_is_clamped_and_bad_values_ignored() {
        assert_eq!(parse(&["--detail", "99"]).detail.level(), ScreenDetail::MAX);
        let options = parse(&["--seed", "abc", "--detail"]);
        assert_eq!(options.seed, None);
        assert_eq!(options.detail, ScreenDetail::default());
    }
}
