//! Shared fixtures: a small QES dataset written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One building with two 4x4 faces, one sensor, three timesteps, a patch
/// variable and an air-cell variable on a 4x3x2 grid.
pub const MANIFEST: &str = r#"<?xml version="1.0"?>
<Settings>
  <Scene>
    <Building>
      <Face patchIndex="0" width="4" height="4">
        <anchor x="0" y="0" z="0"/>
        <v1 x="4" y="0" z="0"/>
        <v2 x="0" y="0" z="4"/>
      </Face>
      <Face patchIndex="16" width="4" height="4">
        <anchor x="4" y="0" z="0"/>
        <v1 x="0" y="4" z="0"/>
        <v2 x="0" y="0" z="4"/>
      </Face>
    </Building>
    <Sensor patchIndex="32">
      <center x="10" y="10" z="1.5"/>
      <normal x="0" y="0" z="1"/>
      <v1 x="1" y="0" z="0"/>
      <v2 x="0" y="1" z="0"/>
    </Sensor>
  </Scene>
  <Timestamps>
    <Timestamp year="2011" month="7" day="1" hour="12" minute="0" second="0"/>
    <Timestamp year="2011" month="7" day="1" hour="13" minute="0" second="0"/>
    <Timestamp year="2011" month="7" day="1" hour="14" minute="0" second="0"/>
  </Timestamps>
  <Variables>
    <Variable name="patch_temperature" longname="Surface temperature" unit="K" min="280" max="310" type="patch"/>
    <Variable name="ac_temperature" longname="Air temperature" unit="K" min="290" max="300" type="aircell"/>
  </Variables>
  <Dimensions>
    <worldDims x="4" y="3" z="2"/>
    <patchDims x="1" y="1" z="0.5"/>
  </Dimensions>
</Settings>
"#;

/// Little-endian bytes of `values`.
pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Patch samples for `timestep`, one per face sample including the
/// sensor's: sample `i` is `280 + timestep + i`.
pub fn patch_values(timestep: usize) -> Vec<f32> {
    (0..33).map(|i| 280.0 + timestep as f32 + i as f32).collect()
}

/// Air-cell samples for `timestep`: cell index plus `290 + timestep`.
pub fn aircell_values(timestep: usize) -> Vec<f32> {
    (0..24).map(|i| 290.0 + timestep as f32 + i as f32).collect()
}

/// Write the fixture dataset into `dir`.
pub fn write_dataset(dir: &Path) {
    fs::write(dir.join("structure.xml"), MANIFEST).unwrap();
    for t in 0..3 {
        fs::write(
            dir.join(format!("patch_temperature{}", t)),
            f32_bytes(&patch_values(t)),
        )
        .unwrap();
        fs::write(
            dir.join(format!("ac_temperature{}", t)),
            f32_bytes(&aircell_values(t)),
        )
        .unwrap();
    }
}

/// A temporary directory holding the fixture dataset.
pub fn dataset() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());
    dir
}

/// A temporary directory holding only a manifest with the given text.
pub fn dataset_with_manifest(manifest: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("structure.xml"), manifest).unwrap();
    dir
}
