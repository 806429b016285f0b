// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a two-object group through a full set of gizmo gestures.
//!
//! This example shows how to combine:
//! - `understory_scene` as the scene graph the objects live in,
//! - `understory_transformer` for hit testing handles and applying drags,
//! - `understory_oriented_bounds` for reading back the group bounds.
//!
//! Set `RUST_LOG=understory_transformer=trace` to see every applied delta.
//!
//! Run:
//! - `cargo run -p understory_demos --example group_gizmo`

use kurbo::{Affine, Point, Rect, Vec2};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use understory_oriented_bounds::{AffineParts, OrientedBounds};
use understory_scene::{LocalNode, NodeId, Scene};
use understory_transformer::{Handle, ScaleHandle, SkewAxis, Target, Transformer, TransformerConfig};

fn report(label: &str, bounds: &OrientedBounds) {
    let [tl, tr, br, bl] = bounds.hull();
    info!(
        rotation = bounds.rotation().to_degrees(),
        width = bounds.inner().width(),
        height = bounds.inner().height(),
        "{label}: hull {tl:.1?} {tr:.1?} {br:.1?} {bl:.1?}"
    );
}

fn report_members(scene: &mut Scene, members: &[NodeId]) {
    for &id in members {
        let Some(world) = scene.resolve_world_transform(id) else {
            continue;
        };
        let parts = AffineParts::from_affine(world);
        info!(
            ?id,
            x = parts.translation.x,
            y = parts.translation.y,
            rotation = parts.rotation.to_degrees(),
            skew = parts.skew.x.to_degrees(),
            scale_x = parts.scale.x,
            scale_y = parts.scale.y,
            "member"
        );
    }
}

/// Press on `handle`, drag through `path`, and release.
fn drag(
    gizmo: &mut Transformer<NodeId>,
    scene: &mut Scene,
    handle: Handle,
    path: &[Vec2],
) -> Option<()> {
    let mut position = gizmo.handle_position(handle)?;
    let grabbed = gizmo.on_pointer_down(scene, position);
    if grabbed != Some(Target::Handle(handle)) {
        info!(?handle, ?grabbed, "handle is covered");
        return None;
    }
    for step in path {
        position += *step;
        gizmo.on_pointer_move(scene, position);
    }
    gizmo.on_pointer_up(scene);
    Some(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut scene = Scene::new();
    let layer = scene.insert(
        None,
        LocalNode {
            local_bounds: Rect::ZERO,
            local_transform: Affine::translate((40.0, 40.0)),
        },
    );
    let members = [
        scene.insert(
            Some(layer),
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 120.0, 80.0),
                local_transform: Affine::IDENTITY,
            },
        ),
        scene.insert(
            Some(layer),
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 60.0, 60.0),
                local_transform: Affine::translate((200.0, 30.0)) * Affine::rotate(0.3),
            },
        ),
    ];
    let _ = scene.commit();

    let mut gizmo = Transformer::new(TransformerConfig::new().with_handle_radius(10.0));
    gizmo.set_group(&mut scene, &members);
    report("selected", gizmo.bounds());

    // Drag the body.
    let inside = gizmo.bounds().center();
    if gizmo.on_pointer_down(&mut scene, inside) == Some(Target::Body) {
        gizmo.on_pointer_move(&mut scene, inside + Vec2::new(15.0, 0.0));
        gizmo.on_pointer_move(&mut scene, inside + Vec2::new(25.0, 10.0));
        gizmo.on_pointer_up(&mut scene);
    }
    report("translated", gizmo.bounds());

    // Swing the rotator a quarter of the way around, reporting the tilt mid-drag.
    let center = gizmo.bounds().center();
    if let Some(grab) = gizmo.handle_position(Handle::Rotator) {
        let radius = (grab - center).hypot();
        let start = (grab - center).atan2();
        gizmo.on_pointer_down_on(&mut scene, Target::Handle(Handle::Rotator), grab);
        for i in 1..=8 {
            let angle = start + f64::from(i) * 0.1;
            gizmo.on_pointer_move(&mut scene, center + Vec2::from_angle(angle) * radius);
        }
        report("rotating", gizmo.bounds());
        gizmo.on_pointer_up(&mut scene);
    }
    report("rotated", gizmo.bounds());

    let steps = [Vec2::new(10.0, 5.0), Vec2::new(10.0, 5.0)];
    let _ = drag(&mut gizmo, &mut scene, Handle::Scale(ScaleHandle::BottomRight), &steps);
    report("scaled", gizmo.bounds());

    let steps = [Vec2::new(0.0, -20.0)];
    let _ = drag(&mut gizmo, &mut scene, Handle::Skew(SkewAxis::Horizontal), &steps);
    report("skewed", gizmo.bounds());

    report_members(&mut scene, &members);
    let probe = Point::new(0.0, 0.0);
    info!(hit = ?gizmo.hit_test(probe), "probe at origin");
}
