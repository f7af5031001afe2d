use maze_flow::{
    Point3, Vector3, Vector4,
    pipelines::{
        light::Light,
        material::{Colour, Material, Shading, TextureRef},
        shading::shade,
    },
};

mod common;

fn overhead_light() -> Light {
    // practically no falloff
    Light::new(Vector4::new(0.0, 10.0, 0.0, 1.0), Colour::WHITE, 1e12)
}

#[test]
fn lit_surface_adds_diffuse_and_specular() {
    let material = Material::phong(Colour([0.2, 0.2, 0.2, 1.0]));
    let lit = shade(
        &material,
        &[overhead_light()],
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
    );
    // 0.2 * 0.5 ambient + 0.2 * 0.6 diffuse + 0.4 specular
    for channel in lit.rgb() {
        assert!((channel - 0.62).abs() < 1e-3, "{:?}", lit);
    }
    assert_eq!(lit.alpha(), 1.0);
}

#[test]
fn surfaces_facing_away_are_only_ambient_lit() {
    let material = Material::phong(Colour([0.2, 0.4, 0.6, 0.5]));
    let lit = shade(
        &material,
        &[overhead_light()],
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
    );
    let [r, g, b] = lit.rgb();
    assert!((r - 0.1).abs() < 1e-5);
    assert!((g - 0.2).abs() < 1e-5);
    assert!((b - 0.3).abs() < 1e-5);
    assert_eq!(lit.alpha(), 0.5);
}

#[test]
fn output_is_clamped() {
    let material = Material::gouraud(Colour::WHITE);
    let lights = [overhead_light(), overhead_light(), overhead_light()];
    let lit = shade(
        &material,
        &lights,
        Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
    );
    assert_eq!(lit.rgb(), [1.0, 1.0, 1.0]);
}

#[test]
fn light_falls_off_with_distance() {
    let material = Material::gouraud(Colour::WHITE);
    let near = Light::new(Vector4::new(0.0, 1.0, 0.0, 1.0), Colour::WHITE, 10.0);
    let far = Light::new(Vector4::new(0.0, 10.0, 0.0, 1.0), Colour::WHITE, 10.0);
    let at = |light: Light| {
        shade(
            &material.with_colour(Colour([0.3, 0.3, 0.3, 1.0])),
            &[light],
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        )
        .rgb()[0]
    };
    assert!(at(near) > at(far));
}

#[test]
fn material_descriptors() {
    let textured = Material::textured(TextureRef::Slide(3));
    assert_eq!(textured.shading, Shading::Textured);
    assert_eq!(textured.ambient, 1.0);
    assert_eq!(textured.texture.map(|t| t.path()), Some("assets/slides/slide_04.png".to_string()));

    let faded = Material::phong(Colour::hex(0x1a9ffa)).with_opacity(0.25);
    assert!(faded.is_transparent());
    assert!(!Material::phong(Colour::hex(0x1a9ffa)).is_transparent());
    assert_eq!(Colour::hex(0xff0000).rgb(), [1.0, 0.0, 0.0]);
}

#[test]
fn light_uniform_is_padded_to_sixteen_bytes() {
    let uniform = overhead_light().to_uniform();
    assert_eq!(bytemuck::bytes_of(&uniform).len() % 16, 0);
}
