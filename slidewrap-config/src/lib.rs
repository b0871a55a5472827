#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use knuffel::errors::DecodeError;
use miette::{Context as _, IntoDiagnostic as _};

pub mod animation;
pub mod gestures;
pub mod utils;

pub use crate::animation::{Animation, Curve};
pub use crate::gestures::Gestures;
pub use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, unwrap(argument), default)]
    pub mode: Mode,
    #[knuffel(child, unwrap(argument), default = true)]
    pub close_on_click: bool,
    /// Pixels per density-independent unit, used for provider-supplied control widths.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub scale: FloatOrInt<0, 16>,
    #[knuffel(child, default)]
    pub animation: Animation,
    #[knuffel(child, default)]
    pub gestures: Gestures,
}

/// How the control elements behave while the content slides.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Controls stay in place and the content slides over them.
    #[default]
    Static,
    /// Controls sit past the right edge and slide in together with the content.
    Dynamic,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::parse(
            "default-config.kdl",
            include_str!("../../resources/default-config.kdl"),
        )
        .unwrap()
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Mode {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        utils::reject_type_name(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        _ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        // Anything unrecognized falls back to the default mode rather than failing the whole
        // config.
        let mode = match &**val {
            knuffel::ast::Literal::String(ref s) => match &**s {
                "static" => Some(Mode::Static),
                "dynamic" => Some(Mode::Dynamic),
                _ => None,
            },
            _ => None,
        };

        Ok(mode.unwrap_or_else(|| {
            debug!("unrecognized mode {:?}, using the default", &**val);
            Mode::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn can_create_default_config() {
        let _ = Config::default();
    }

    #[test]
    fn empty_config_matches_defaults() {
        let config = Config::parse("config.kdl", "").unwrap();
        assert_eq!(config.mode, Mode::Static);
        assert!(config.close_on_click);
        assert_eq!(config.scale, FloatOrInt(1.));
        assert_eq!(config.animation, Animation::default());
        assert_eq!(config.gestures, Gestures::default());
        assert_eq!(config, Config::default());
    }

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn parse() {
        let parsed = do_parse(
            r##"
            mode "dynamic"
            close-on-click false
            scale 2.5

            animation {
                duration-ms 250
                curve "cubic-bezier" 0.05 0.7 0.1 1
                slowdown 3
            }

            gestures {
                tap-timeout-ms 200
                long-press-timeout-ms 500
                touch-slop 12
                horizontal-ratio 2.0
            }
            "##,
        );

        assert_debug_snapshot!(parsed, @r#"
        Config {
            mode: Dynamic,
            close_on_click: false,
            scale: FloatOrInt(
                2.5,
            ),
            animation: Animation {
                off: false,
                duration_ms: 250,
                curve: CubicBezier(
                    0.05,
                    0.7,
                    0.1,
                    1.0,
                ),
                slowdown: 3.0,
            },
            gestures: Gestures {
                tap_timeout_ms: 200,
                long_press_timeout_ms: 500,
                touch_slop: FloatOrInt(
                    12.0,
                ),
                horizontal_ratio: FloatOrInt(
                    2.0,
                ),
            },
        }
        "#);
    }

    #[test]
    fn unknown_mode_falls_back_to_static() {
        let parsed = do_parse(r#"mode "sideways""#);
        assert_eq!(parsed.mode, Mode::Static);

        let parsed = do_parse("mode 5");
        assert_eq!(parsed.mode, Mode::Static);
    }

    #[test]
    fn partial_gestures_keep_defaults() {
        let parsed = do_parse("gestures { touch-slop 8; }");
        assert_eq!(
            parsed.gestures,
            Gestures {
                touch_slop: FloatOrInt(8.),
                ..Gestures::default()
            }
        );
    }

    #[test]
    fn animation_off() {
        let parsed = do_parse("animation { off; }");
        assert_eq!(parsed.animation, Animation::new_off());
    }

    #[test]
    fn zero_duration_is_an_error() {
        assert!(Config::parse("test.kdl", "animation { duration-ms 0; }").is_err());

        // Allowed when the animation is off anyway.
        let parsed = do_parse("animation { off; duration-ms 0; }");
        assert!(parsed.animation.off);
    }

    #[test]
    fn unknown_curve_is_an_error() {
        assert!(Config::parse("test.kdl", r#"animation { curve "bounce"; }"#).is_err());
    }

    #[test]
    fn bezier_x_out_of_range_is_an_error() {
        let text = r#"animation { curve "cubic-bezier" 1.5 0 0.5 1; }"#;
        assert!(Config::parse("test.kdl", text).is_err());
    }

    #[test]
    fn negative_scale_is_an_error() {
        assert!(Config::parse("test.kdl", "scale -1").is_err());
    }
}
