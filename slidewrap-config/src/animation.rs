use knuffel::errors::DecodeError;

use crate::utils::{expect_only_children, parse_arg_node, reject_trailing, FloatOrInt};

/// Snap animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
    /// Multiplier applied to the duration.
    pub slowdown: f64,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            off: false,
            duration_ms: 300,
            curve: Curve::EaseOutCubic,
            slowdown: 1.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
    CubicBezier(f64, f64, f64, f64),
}

impl Animation {
    pub fn new_off() -> Self {
        Self {
            off: true,
            ..Self::default()
        }
    }
}

impl<S> knuffel::Decode<S> for Animation
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        expect_only_children(node, ctx);

        let mut rv = Self::default();
        let mut seen_duration = false;
        let mut seen_curve = false;

        for child in node.children() {
            match &**child.node_name {
                "off" => {
                    knuffel::decode::check_flag_node(child, ctx);
                    rv.off = true;
                }
                "duration-ms" => {
                    if seen_duration {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `duration-ms`, single node expected",
                        ));
                    }
                    seen_duration = true;
                    rv.duration_ms = parse_arg_node("duration-ms", child, ctx)?;
                }
                "curve" => {
                    if seen_curve {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `curve`, single node expected",
                        ));
                    }
                    seen_curve = true;
                    if let Some(curve) = decode_curve(child, ctx)? {
                        rv.curve = curve;
                    }
                }
                "slowdown" => {
                    let slowdown: FloatOrInt<0, { i32::MAX }> =
                        parse_arg_node("slowdown", child, ctx)?;
                    rv.slowdown = slowdown.0;
                }
                name_str => {
                    ctx.emit_error(DecodeError::unexpected(
                        child,
                        "node",
                        format!("unexpected node `{}`", name_str.escape_default()),
                    ));
                }
            }
        }

        if !rv.off && rv.duration_ms == 0 {
            ctx.emit_error(DecodeError::conversion(
                node,
                "duration-ms must be greater than 0, use `off` to disable the animation",
            ));
        }

        Ok(rv)
    }
}

fn decode_curve<S: knuffel::traits::ErrorSpan>(
    node: &knuffel::ast::SpannedNode<S>,
    ctx: &mut knuffel::decode::Context<S>,
) -> Result<Option<Curve>, DecodeError<S>> {
    let mut args = node.arguments.iter();
    let val = args
        .next()
        .ok_or_else(|| DecodeError::missing(node, "additional argument `curve` is required"))?;
    let name: String = knuffel::traits::DecodeScalar::decode(val, ctx)?;

    let curve = match name.as_str() {
        "linear" => Some(Curve::Linear),
        "ease-out-quad" => Some(Curve::EaseOutQuad),
        "ease-out-cubic" => Some(Curve::EaseOutCubic),
        "ease-out-expo" => Some(Curve::EaseOutExpo),
        "cubic-bezier" => {
            let mut points = [0.; 4];
            for (idx, point) in points.iter_mut().enumerate() {
                let val = args.next().ok_or_else(|| {
                    DecodeError::missing(
                        node,
                        "cubic-bezier needs four control point coordinates: x1 y1 x2 y2",
                    )
                })?;

                // X is time, so it has to stay within the animation.
                *point = if idx % 2 == 0 {
                    let x: FloatOrInt<0, 1> = knuffel::traits::DecodeScalar::decode(val, ctx)?;
                    x.0
                } else {
                    let y: FloatOrInt<{ i32::MIN }, { i32::MAX }> =
                        knuffel::traits::DecodeScalar::decode(val, ctx)?;
                    y.0
                };
            }
            let [x1, y1, x2, y2] = points;
            Some(Curve::CubicBezier(x1, y1, x2, y2))
        }
        unknown => {
            ctx.emit_error(DecodeError::unexpected(
                &val.literal,
                "argument",
                format!(
                    "unexpected animation curve `{unknown}`, expected one of `linear`, \
                     `ease-out-quad`, `ease-out-cubic`, `ease-out-expo` or `cubic-bezier`"
                ),
            ));
            None
        }
    };

    reject_trailing(node, args, ctx);
    Ok(curve)
}
