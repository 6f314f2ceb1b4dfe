//! Body primitives in combinatorial-geometry form.

use crate::context::SerializationContext;
use crate::error::{ConverterError, EntityRef, Result};
use crate::GEO_FILE;
use sim_setup::geometry::center_and_size_to_min_max;
use sim_setup::{Body, BodyGeometry, BodyId};
use std::collections::BTreeMap;

/// Original body id → engine body id.
pub type BodyMap = BTreeMap<BodyId, u32>;

/// One body line of `geo.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCard {
    pub engine_id: u32,
    /// `SPH`, `RPP` or `RCC`.
    pub tag: &'static str,
    pub args: Vec<f64>,
}

/// Compiled bodies, the absorbing boundary body last.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBodies {
    pub cards: Vec<BodyCard>,
    pub map: BodyMap,
    pub blackhole: u32,
}

pub fn compile_bodies(
    bodies: &BTreeMap<BodyId, Body>,
    blackhole_half_extent: f64,
    ctx: &mut SerializationContext,
) -> Result<CompiledBodies> {
    let mut map = BodyMap::new();
    let mut cards = Vec::with_capacity(bodies.len() + 1);

    // dense 1-based ids in ascending original id order
    for (engine_id, (&id, body)) in (1u32..).zip(bodies) {
        map.insert(id, engine_id);
        ctx.register_body(engine_id, id);
        let (tag, args) = primitive(id, &body.geometry)?;
        cards.push(BodyCard { engine_id, tag, args });
    }

    let blackhole = cards.len() as u32 + 1;
    let h = blackhole_half_extent;
    cards.push(BodyCard {
        engine_id: blackhole,
        tag: "RPP",
        args: vec![-h, h, -h, h, -h, h],
    });

    Ok(CompiledBodies {
        cards,
        map,
        blackhole,
    })
}

fn positive(id: BodyId, field: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConverterError::Degenerate {
            owner: EntityRef::body(id),
            file: GEO_FILE,
            field,
            value,
        })
    }
}

fn primitive(id: BodyId, geometry: &BodyGeometry) -> Result<(&'static str, Vec<f64>)> {
    match *geometry {
        BodyGeometry::Sphere { center, radius } => {
            let radius = positive(id, "radius", radius)?;
            Ok(("SPH", vec![center.x, center.y, center.z, radius]))
        }
        BodyGeometry::Cuboid { center, size } => {
            let (x_min, x_max) = center_and_size_to_min_max(center.x, positive(id, "size.x", size.x)?);
            let (y_min, y_max) = center_and_size_to_min_max(center.y, positive(id, "size.y", size.y)?);
            let (z_min, z_max) = center_and_size_to_min_max(center.z, positive(id, "size.z", size.z)?);
            Ok(("RPP", vec![x_min, x_max, y_min, y_max, z_min, z_max]))
        }
        BodyGeometry::Cylinder {
            base_center,
            height,
            radius,
        } => {
            let height = positive(id, "height", height)?;
            let radius = positive(id, "radius", radius)?;
            // axis fixed along +Y
            Ok((
                "RCC",
                vec![base_center.x, base_center.y, base_center.z, 0.0, height, 0.0, radius],
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_setup::{Point, Vec3};

    fn catalog(bodies: Vec<Body>) -> BTreeMap<BodyId, Body> {
        bodies.into_iter().map(|b| (b.id, b)).collect()
    }

    #[test]
    fn cuboid_bounds() {
        let bodies = catalog(vec![Body::new(
            1,
            BodyGeometry::Cuboid {
                center: Point::new(10.0, 20.0, 30.0),
                size: Vec3::new(100.0, 200.0, 30.5),
            },
        )]);
        let compiled = compile_bodies(&bodies, 250.0, &mut SerializationContext::new()).unwrap();
        assert_eq!(compiled.cards[0].tag, "RPP");
        assert_eq!(compiled.cards[0].args, vec![-40.0, 60.0, -80.0, 120.0, 14.75, 45.25]);
    }

    #[test]
    fn ids_follow_original_order_and_blackhole_is_last() {
        let sphere = |id| {
            Body::new(
                id,
                BodyGeometry::Sphere {
                    center: Point::origin(),
                    radius: 1.0,
                },
            )
        };
        let bodies = catalog(vec![sphere(30), sphere(-2), sphere(7)]);
        let mut ctx = SerializationContext::new();
        let compiled = compile_bodies(&bodies, 250.0, &mut ctx).unwrap();
        assert_eq!(compiled.map[&BodyId(-2)], 1);
        assert_eq!(compiled.map[&BodyId(7)], 2);
        assert_eq!(compiled.map[&BodyId(30)], 3);
        assert_eq!(compiled.blackhole, 4);
        let last = compiled.cards.last().unwrap();
        assert_eq!(last.engine_id, 4);
        assert_eq!(last.args, vec![-250.0, 250.0, -250.0, 250.0, -250.0, 250.0]);
        assert_eq!(ctx.body(3), Some(BodyId(30)));
        assert_eq!(ctx.body(4), None);
    }

    #[test]
    fn cylinder_axis_along_y() {
        let bodies = catalog(vec![Body::new(
            1,
            BodyGeometry::Cylinder {
                base_center: Point::new(1.0, 2.0, 3.0),
                height: 4.0,
                radius: 5.0,
            },
        )]);
        let compiled = compile_bodies(&bodies, 250.0, &mut SerializationContext::new()).unwrap();
        assert_eq!(compiled.cards[0].tag, "RCC");
        assert_eq!(compiled.cards[0].args, vec![1.0, 2.0, 3.0, 0.0, 4.0, 0.0, 5.0]);
    }

    #[test]
    fn degenerate_bodies_rejected() {
        let flat = catalog(vec![Body::new(
            9,
            BodyGeometry::Cuboid {
                center: Point::origin(),
                size: Vec3::new(1.0, 0.0, 1.0),
            },
        )]);
        let err = compile_bodies(&flat, 250.0, &mut SerializationContext::new()).unwrap_err();
        assert!(matches!(err, ConverterError::Degenerate { field: "size.y", .. }));
        assert_eq!(err.entity(), Some(EntityRef::body(9)));

        let point = catalog(vec![Body::new(
            2,
            BodyGeometry::Sphere {
                center: Point::origin(),
                radius: -1.0,
            },
        )]);
        assert!(compile_bodies(&point, 250.0, &mut SerializationContext::new()).is_err());
    }
}
