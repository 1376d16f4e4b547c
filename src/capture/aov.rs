/// Which auxiliary render buffer a recorder captures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AovKind {
    /// Final lit color.
    Beauty,
    /// Surface base color.
    Albedo,
    /// World-space normals, remapped to `[0, 1]`.
    Normal,
    /// Linear camera depth. Unbounded; meaningful in float outputs.
    #[default]
    Depth,
    /// Screen-space motion, remapped around 0.5.
    MotionVectors,
    /// Occlusion term.
    AmbientOcclusion,
    /// Self-illumination; may exceed 1.0.
    Emissive,
}

impl AovKind {
    pub fn all() -> &'static [AovKind] {
        &[
            AovKind::Beauty,
            AovKind::Albedo,
            AovKind::Normal,
            AovKind::Depth,
            AovKind::MotionVectors,
            AovKind::AmbientOcclusion,
            AovKind::Emissive,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            AovKind::Beauty => "beauty",
            AovKind::Albedo => "albedo",
            AovKind::Normal => "normal",
            AovKind::Depth => "depth",
            AovKind::MotionVectors => "motion_vectors",
            AovKind::AmbientOcclusion => "ambient_occlusion",
            AovKind::Emissive => "emissive",
        }
    }

    /// Deterministic straight-alpha RGBA sample for pixel `(x, y)` of a `w`x`h` target on `frame`.
    ///
    /// Stands in for a renderer's AOV pass so the pipeline can be exercised end to end.
    pub fn sample(self, x: u32, y: u32, w: u32, h: u32, frame: u64) -> [f32; 4] {
        let u = (x as f32 + 0.5) / w.max(1) as f32;
        let v = (y as f32 + 0.5) / h.max(1) as f32;
        let t = (frame % 240) as f32 / 240.0;

        match self {
            AovKind::Beauty => [(u + t).fract(), v, 1.0 - (u * v), 1.0],
            AovKind::Albedo => {
                let checker = ((x / 8) + (y / 8) + (frame % 2) as u32) % 2 == 0;
                if checker {
                    [0.8, 0.75, 0.7, 1.0]
                } else {
                    [0.2, 0.25, 0.3, 1.0]
                }
            }
            AovKind::Normal => {
                let nx = u * 2.0 - 1.0;
                let ny = v * 2.0 - 1.0;
                let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();
                [nx * 0.5 + 0.5, ny * 0.5 + 0.5, nz * 0.5 + 0.5, 1.0]
            }
            AovKind::Depth => {
                let dx = u - 0.5;
                let dy = v - 0.5;
                let d = 1.0 + (dx * dx + dy * dy).sqrt() * 8.0 + frame as f32 * 0.01;
                [d, d, d, 1.0]
            }
            AovKind::MotionVectors => {
                let phase = t * std::f32::consts::TAU;
                [0.5 + 0.25 * phase.cos(), 0.5 + 0.25 * phase.sin(), 0.0, 1.0]
            }
            AovKind::AmbientOcclusion => {
                let dx = u - 0.5;
                let dy = v - 0.5;
                let ao = (1.0 - (dx * dx + dy * dy) * 2.0).clamp(0.0, 1.0);
                [ao, ao, ao, 1.0]
            }
            AovKind::Emissive => {
                let cx = 0.5 + 0.3 * (t * std::f32::consts::TAU).cos();
                let dx = u - cx;
                let dy = v - 0.5;
                let e = 4.0 * (-(dx * dx + dy * dy) * 40.0).exp();
                [e, e * 0.6, e * 0.2, 1.0]
            }
        }
    }
}

impl std::fmt::Display for AovKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
