//! Built-in demo scenes.

use crate::cli::SceneName;
use rand::Rng;
use std::sync::Arc;
use umbra_renderer::{
    gen_f32, random_color, CameraSettings, Color, HittableList, Material, Plane, Sphere, Texture,
    Vec3,
};

/// Scene geometry together with the camera that frames it.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
}

/// Build a named scene. `rng` only drives object placement.
pub fn build(name: SceneName, rng: &mut impl Rng) -> Scene {
    match name {
        SceneName::Cover => cover(rng),
        SceneName::Spheres => spheres(),
        SceneName::Checker => checker(),
    }
}

fn checker_ground() -> Texture {
    Texture::checker_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9))
}

fn cover(rng: &mut impl Rng) -> Scene {
    let mut world = HittableList::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::textured(checker_ground())),
    ));

    let glass = Arc::new(Material::dielectric(1.5));
    let clearing = Vec3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - clearing).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let target = center + Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                world.add(Sphere::moving(
                    center,
                    target,
                    0.2,
                    Arc::new(Material::lambertian(albedo)),
                ));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                world.add(Sphere::new(center, 0.2, Arc::new(Material::metal(albedo, fuzz))));
            } else {
                world.add(Sphere::new(center, 0.2, glass.clone()));
            }
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = CameraSettings::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene { world, camera }
}

fn spheres() -> Scene {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let gold = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.3));

    world.add(Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, ground));
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.2), 0.5, center));
    // Glass shell: outer surface plus an inward-facing inner wall
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.4, glass));
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold));

    let camera = CameraSettings::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 10.0, 3.4);

    Scene { world, camera }
}

fn checker() -> Scene {
    let mut world = HittableList::new();
    let checkered = Arc::new(Material::textured(checker_ground()));

    world.add(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, checkered.clone()));
    world.add(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, checkered));

    let camera = CameraSettings::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene { world, camera }
}
