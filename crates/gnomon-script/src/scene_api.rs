//! Rhai API for scene construction
//!
//! Every construction operation of [`gnomon_core::Scene`] is exposed to
//! scripts. All functions share one scene through a [`SharedScene`] handle,
//! so a script reads as a plain sequence of calls:
//!
//! ```rhai
//! cube("ABCDEFGH");
//! mid_point("M", "AG");
//! section("ACG");
//! arrow("AM");
//! ```
//!
//! Names can be given as a string (one character per point) or as an array
//! of strings. The camelCase spellings (`pointFromVec`, `midPoint`,
//! `showVector`, `dontRotate`, `Square`, `Box`, `Cube`) are registered as
//! aliases so older scene scripts keep running.

use gnomon_core::names::NamePair;
use gnomon_core::plane::PlaneKind;
use gnomon_core::point::Point;
use gnomon_core::Scene;
use gnomon_math::Vector;
use parking_lot::Mutex;
use rhai::{Array, Dynamic, Engine, EvalAltResult, ImmutableString, Position};
use std::sync::Arc;
use thiserror::Error;

/// Scene shared between the registered script functions
pub type SharedScene = Arc<Mutex<Scene>>;

type RhaiResult<T> = Result<T, Box<EvalAltResult>>;

/// A construction error raised inside a script.
///
/// Carried through Rhai as the payload of a runtime error so the engine can
/// hand the original failure back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ConstructionFailure {
    pub message: String,
    /// Name that failed to resolve, for unknown-point errors
    pub unknown_name: Option<String>,
    pub operation: Option<&'static str>,
}

impl From<gnomon_core::Error> for ConstructionFailure {
    fn from(err: gnomon_core::Error) -> Self {
        Self {
            message: err.to_string(),
            unknown_name: err.unknown_name().map(String::from),
            operation: err.operation(),
        }
    }
}

impl ConstructionFailure {
    /// Find a construction failure inside a Rhai error, looking through
    /// nested function calls.
    pub fn from_eval_error(err: &EvalAltResult) -> Option<Self> {
        match err {
            EvalAltResult::ErrorRuntime(value, _) => value.clone().try_cast::<Self>(),
            EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => Self::from_eval_error(inner),
            _ => None,
        }
    }
}

fn fail(err: gnomon_core::Error) -> Box<EvalAltResult> {
    let failure = ConstructionFailure::from(err);
    EvalAltResult::ErrorRuntime(Dynamic::from(failure), Position::NONE).into()
}

fn invalid(operation: &'static str, reason: impl Into<String>) -> Box<EvalAltResult> {
    fail(gnomon_core::Error::InvalidOperand {
        operation,
        reason: reason.into(),
    })
}

// ============================================================================
// Argument conversion
// ============================================================================

/// Accept both FLOAT and INT script values
fn number(value: &Dynamic, operation: &'static str) -> RhaiResult<f64> {
    if let Some(f) = value.clone().try_cast::<f64>() {
        return Ok(f);
    }
    if let Some(i) = value.clone().try_cast::<i64>() {
        return Ok(i as f64);
    }
    Err(invalid(
        operation,
        format!("expected a number, got {}", value.type_name()),
    ))
}

fn name_list(names: &Array, operation: &'static str) -> RhaiResult<Vec<String>> {
    names
        .iter()
        .map(|name| {
            name.clone().into_string().map_err(|type_name| {
                invalid(
                    operation,
                    format!("point names must be strings, got {}", type_name),
                )
            })
        })
        .collect()
}

fn pair_from_array(names: &Array, operation: &'static str) -> RhaiResult<NamePair> {
    match name_list(names, operation)?.as_slice() {
        [a, b] => Ok(NamePair::new(a.as_str(), b.as_str())),
        other => Err(invalid(
            operation,
            format!("expected two point names, got {}", other.len()),
        )),
    }
}

fn pair_from_str(code: &str, operation: &'static str) -> RhaiResult<NamePair> {
    NamePair::parse(code, operation).map_err(fail)
}

/// Build a vector from a script array, padding missing components with zero
pub fn vector_from_array(components: &Array) -> RhaiResult<Vector> {
    let components = components
        .iter()
        .map(|c| number(c, "vector"))
        .collect::<RhaiResult<Vec<_>>>()?;
    Ok(Vector::from_components(&components))
}

fn vector3(x: Dynamic, y: Dynamic, z: Dynamic) -> RhaiResult<Vector> {
    Ok(Vector::new(
        number(&x, "vector")?,
        number(&y, "vector")?,
        number(&z, "vector")?,
    ))
}

fn point_pair(a: Point, b: Point) -> Array {
    vec![Dynamic::from(a), Dynamic::from(b)]
}

fn name_pair_array(pair: &NamePair) -> Array {
    vec![
        Dynamic::from(pair.first.clone()),
        Dynamic::from(pair.second.clone()),
    ]
}

// ============================================================================
// Registration
// ============================================================================

/// Register the vector type, its operators and the math helpers
pub fn register_vector_api(engine: &mut Engine) {
    engine
        .register_type_with_name::<Vector>("Vector")
        .register_get("x", |v: &mut Vector| v.x)
        .register_get("y", |v: &mut Vector| v.y)
        .register_get("z", |v: &mut Vector| v.z)
        .register_get("mag", |v: &mut Vector| v.mag())
        .register_get("mag2", |v: &mut Vector| v.mag2())
        .register_get("normalized", |v: &mut Vector| v.normalized())
        .register_fn("to_string", |v: &mut Vector| v.to_string())
        .register_fn("to_debug", |v: &mut Vector| v.to_string())
        .register_fn("to_array", |v: &mut Vector| -> Array {
            v.to_array().into_iter().map(Dynamic::from).collect()
        });

    // === Constructors ===
    engine.register_fn("vector", vector3);
    engine.register_fn("vector", |components: Array| vector_from_array(&components));
    engine.register_fn("zero", || Vector::ZERO);

    // === Operators ===
    engine.register_fn("+", |a: Vector, b: Vector| a + b);
    engine.register_fn("-", |a: Vector, b: Vector| a - b);
    engine.register_fn("-", |a: Vector| -a);
    engine.register_fn("*", |v: Vector, k: f64| v * k);
    engine.register_fn("*", |k: f64, v: Vector| k * v);
    engine.register_fn("*", |v: Vector, k: i64| v * k as f64);
    engine.register_fn("*", |k: i64, v: Vector| k as f64 * v);
    engine.register_fn("/", |v: Vector, k: f64| v / k);
    engine.register_fn("/", |v: Vector, k: i64| v / k as f64);
    engine.register_fn("==", |a: Vector, b: Vector| a == b);
    engine.register_fn("!=", |a: Vector, b: Vector| a != b);

    // === Algebra ===
    engine.register_fn("dot", |a: Vector, b: Vector| a.dot(b));
    engine.register_fn("scale", |v: Vector, k: f64| v.scale(k));
    engine.register_fn("cross", |a: Vector, b: Vector| a.cross(b));
    engine.register_fn("normalize", |v: Vector| v.normalized());
    engine.register_fn("lerp", |a: Vector, b: Vector, s: f64| a.lerp(b, s));
}

/// Register every scene-construction function against `scene`
pub fn register_scene_api(engine: &mut Engine, scene: &SharedScene) {
    engine
        .register_type_with_name::<Point>("Point")
        .register_get("name", |p: &mut Point| p.name.clone())
        .register_get("position", |p: &mut Point| p.position)
        .register_fn("to_string", |p: &mut Point| format!("{} {}", p.name, p.position))
        .register_fn("to_debug", |p: &mut Point| format!("{} {}", p.name, p.position));

    register_points(engine, scene);
    register_helpers(engine, scene);
    register_shapes(engine, scene);
    register_planes(engine, scene);
    register_edges(engine, scene);
    register_settings(engine, scene);
}

fn register_points(engine: &mut Engine, scene: &SharedScene) {
    let s = scene.clone();
    engine.register_fn("point", move |name: ImmutableString| -> RhaiResult<Point> {
        s.lock().point(&name).cloned().map_err(fail)
    });

    // Explicit registration: new_point("A", vector(0, 0, 0))
    let s = scene.clone();
    engine.register_fn("new_point", move |name: ImmutableString, position: Vector| {
        s.lock().insert_point(name.as_str(), position)
    });

    let s = scene.clone();
    engine.register_fn(
        "redefine_point",
        move |name: ImmutableString, position: Vector| -> RhaiResult<Vector> {
            s.lock().redefine_point(&name, position).map_err(fail)
        },
    );

    let s = scene.clone();
    engine.register_fn("has_point", move |name: ImmutableString| {
        s.lock().contains_point(&name)
    });
}

fn register_helpers(engine: &mut Engine, scene: &SharedScene) {
    // === vec ===
    let s = scene.clone();
    engine.register_fn("vec", move |pair: ImmutableString| -> RhaiResult<Vector> {
        let pair = pair_from_str(&pair, "vec")?;
        s.lock().vec(pair).map_err(fail)
    });
    let s = scene.clone();
    engine.register_fn("vec", move |pair: Array| -> RhaiResult<Vector> {
        let pair = pair_from_array(&pair, "vec")?;
        s.lock().vec(pair).map_err(fail)
    });

    // === point_from_vec ===
    for name in ["point_from_vec", "pointFromVec"] {
        let s = scene.clone();
        engine.register_fn(
            name,
            move |pair: ImmutableString, expression: Vector| -> RhaiResult<Point> {
                let pair = pair_from_str(&pair, "point_from_vec")?;
                s.lock().point_from_vec(pair, expression, None).map_err(fail)
            },
        );
        let s = scene.clone();
        engine.register_fn(
            name,
            move |pair: ImmutableString,
                  expression: Vector,
                  fixed: ImmutableString|
                  -> RhaiResult<Point> {
                let pair = pair_from_str(&pair, "point_from_vec")?;
                s.lock()
                    .point_from_vec(pair, expression, Some(fixed.as_str()))
                    .map_err(fail)
            },
        );
        let s = scene.clone();
        engine.register_fn(
            name,
            move |pair: Array, expression: Vector| -> RhaiResult<Point> {
                let pair = pair_from_array(&pair, "point_from_vec")?;
                s.lock().point_from_vec(pair, expression, None).map_err(fail)
            },
        );
    }

    // === mid_point ===
    for name in ["mid_point", "midPoint"] {
        let s = scene.clone();
        engine.register_fn(
            name,
            move |point: ImmutableString, pair: ImmutableString| -> RhaiResult<Point> {
                let pair = pair_from_str(&pair, "mid_point")?;
                s.lock().mid_point(&point, pair).map_err(fail)
            },
        );
        let s = scene.clone();
        engine.register_fn(
            name,
            move |point: ImmutableString, pair: Array| -> RhaiResult<Point> {
                let pair = pair_from_array(&pair, "mid_point")?;
                s.lock().mid_point(&point, pair).map_err(fail)
            },
        );
    }
}

fn register_shapes(engine: &mut Engine, scene: &SharedScene) {
    for name in ["square", "Square"] {
        let s = scene.clone();
        engine.register_fn(name, move |names: ImmutableString| -> RhaiResult<()> {
            s.lock().square(names.as_str()).map(|_| ()).map_err(fail)
        });
        let s = scene.clone();
        engine.register_fn(name, move |names: Array| -> RhaiResult<()> {
            let names = name_list(&names, "square")?;
            s.lock().square(names).map(|_| ()).map_err(fail)
        });
    }

    for name in ["box", "Box"] {
        let s = scene.clone();
        engine.register_fn(
            name,
            move |names: ImmutableString, w: Dynamic, h: Dynamic, d: Dynamic| -> RhaiResult<()> {
                let [w, h, d] = [number(&w, "box")?, number(&h, "box")?, number(&d, "box")?];
                s.lock()
                    .cuboid(names.as_str(), w, h, d)
                    .map(|_| ())
                    .map_err(fail)
            },
        );
        let s = scene.clone();
        engine.register_fn(
            name,
            move |names: Array, w: Dynamic, h: Dynamic, d: Dynamic| -> RhaiResult<()> {
                let names = name_list(&names, "box")?;
                let [w, h, d] = [number(&w, "box")?, number(&h, "box")?, number(&d, "box")?];
                s.lock().cuboid(names, w, h, d).map(|_| ()).map_err(fail)
            },
        );
    }

    for name in ["cube", "Cube"] {
        let s = scene.clone();
        engine.register_fn(name, move |names: ImmutableString| -> RhaiResult<()> {
            s.lock().cube(names.as_str()).map(|_| ()).map_err(fail)
        });
        let s = scene.clone();
        engine.register_fn(name, move |names: Array| -> RhaiResult<()> {
            let names = name_list(&names, "cube")?;
            s.lock().cube(names).map(|_| ()).map_err(fail)
        });
    }
}

fn add_plane(
    scene: &SharedScene,
    names: &str,
    kind: PlaneKind,
    size: &Dynamic,
) -> RhaiResult<()> {
    let size = number(size, "plane")?;
    scene
        .lock()
        .add_plane(names, kind, size)
        .map(|_| ())
        .map_err(fail)
}

fn plane_kind(section: bool) -> PlaneKind {
    if section {
        PlaneKind::Section
    } else {
        PlaneKind::Plane
    }
}

fn register_planes(engine: &mut Engine, scene: &SharedScene) {
    let s = scene.clone();
    engine.register_fn("plane", move |names: ImmutableString| -> RhaiResult<()> {
        add_plane(&s, &names, PlaneKind::Plane, &Dynamic::from(1.0_f64))
    });
    let s = scene.clone();
    engine.register_fn(
        "plane",
        move |names: ImmutableString, section: bool| -> RhaiResult<()> {
            add_plane(&s, &names, plane_kind(section), &Dynamic::from(1.0_f64))
        },
    );
    let s = scene.clone();
    engine.register_fn(
        "plane",
        move |names: ImmutableString, section: bool, size: Dynamic| -> RhaiResult<()> {
            add_plane(&s, &names, plane_kind(section), &size)
        },
    );

    let s = scene.clone();
    engine.register_fn("section", move |names: ImmutableString| -> RhaiResult<()> {
        add_plane(&s, &names, PlaneKind::Section, &Dynamic::from(1.0_f64))
    });
    let s = scene.clone();
    engine.register_fn(
        "section",
        move |names: ImmutableString, size: Dynamic| -> RhaiResult<()> {
            add_plane(&s, &names, PlaneKind::Section, &size)
        },
    );
}

fn register_edges(engine: &mut Engine, scene: &SharedScene) {
    let s = scene.clone();
    engine.register_fn("line", move |pair: ImmutableString| -> RhaiResult<Array> {
        let pair = pair_from_str(&pair, "line")?;
        let (a, b) = s.lock().line(pair).map_err(fail)?;
        Ok(point_pair(a, b))
    });
    let s = scene.clone();
    engine.register_fn("line", move |pair: Array| -> RhaiResult<Array> {
        let pair = pair_from_array(&pair, "line")?;
        let (a, b) = s.lock().line(pair).map_err(fail)?;
        Ok(point_pair(a, b))
    });

    for name in ["arrow", "show_vector", "showVector"] {
        let s = scene.clone();
        engine.register_fn(name, move |pair: ImmutableString| -> RhaiResult<Array> {
            let pair = pair_from_str(&pair, "arrow")?;
            let pair = s.lock().arrow(pair).map_err(fail)?;
            Ok(name_pair_array(&pair))
        });
        let s = scene.clone();
        engine.register_fn(name, move |pair: Array| -> RhaiResult<Array> {
            let pair = pair_from_array(&pair, "arrow")?;
            let pair = s.lock().arrow(pair).map_err(fail)?;
            Ok(name_pair_array(&pair))
        });
    }
}

fn register_settings(engine: &mut Engine, scene: &SharedScene) {
    let s = scene.clone();
    engine.register_fn("rotate", move || s.lock().rotate(1.0));
    let s = scene.clone();
    engine.register_fn("rotate", move |speed: Dynamic| -> RhaiResult<()> {
        let speed = number(&speed, "rotate")?;
        s.lock().rotate(speed);
        Ok(())
    });

    for name in ["dont_rotate", "dontRotate"] {
        let s = scene.clone();
        engine.register_fn(name, move || s.lock().dont_rotate());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn engine_with_scene() -> (Engine, SharedScene) {
        let scene = SharedScene::default();
        let mut engine = Engine::new();
        register_vector_api(&mut engine);
        register_scene_api(&mut engine, &scene);
        (engine, scene)
    }

    #[test]
    fn test_vector_operators() {
        let (engine, _) = engine_with_scene();
        let v: Vector = engine
            .eval("0.5 * (vector(2, 0, 0) + vector([0.0, 4.0])) - vector(0, 0, 1)")
            .unwrap();
        assert_eq!(v, Vector::new(1.0, 2.0, -1.0));

        let d: f64 = engine.eval("dot(vector(1, 2, 3), vector(1, 1, 1))").unwrap();
        assert!((d - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_rejects_non_numbers() {
        let (engine, _) = engine_with_scene();
        let err = engine.eval::<Vector>(r#"vector([1.0, "two"])"#).unwrap_err();
        let failure = ConstructionFailure::from_eval_error(&err).unwrap();
        assert_eq!(failure.operation, Some("vector"));
    }

    #[test]
    fn test_functions_share_one_scene() {
        let (engine, scene) = engine_with_scene();
        engine
            .run(r#"cube("ABCDEFGH"); midPoint("M", ["A", "G"]); arrow("AM");"#)
            .unwrap();
        let scene = scene.lock();
        assert_eq!(scene.point_count(), 9);
        assert_eq!(scene.position("M").unwrap(), Vector::ZERO);
        assert_eq!(scene.arrows().codes(), vec!["AM"]);
    }

    #[test]
    fn test_unknown_point_surfaces_as_failure() {
        let (engine, _) = engine_with_scene();
        let err = engine.run(r#"line("AB");"#).unwrap_err();
        let failure = ConstructionFailure::from_eval_error(&err).unwrap();
        assert_eq!(failure.unknown_name.as_deref(), Some("A"));
        assert_eq!(failure.operation, Some("line"));
    }

    #[test]
    fn test_point_accessors() {
        let (engine, _) = engine_with_scene();
        let x: f64 = engine
            .eval(r#"new_point("A", vector(3, 4, 0)); point("A").position.x"#)
            .unwrap();
        assert!((x - 3.0).abs() < 1e-12);
    }
}
