use std::fs::write;

use super::*;


fn targets(ts: &[(usize, &str)]) -> Vec<Target> {
    ts.iter()
        .map(|&(index, name)| Target {
            index,
            name: name.to_owned(),
        })
        .collect()
}

#[test]
fn process_water() {
    let config = Config::new("testfiles/records", "out", vec![]);
    let got = process_record(
        &config,
        "water",
        &Record::load("testfiles/records/qm9s_1.csv").unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(got.name, "water");
    assert_eq!(got.formula, "H2O");
    assert_eq!(got.smiles, "O");
    assert_eq!(got.atom_count, 3);
    assert_eq!(got.bonds.len(), 2);
    assert!(got.spectrum.is_none());

    let freqs: Vec<_> = got.modes.iter().map(|m| m.frequency).collect();
    assert_eq!(freqs, vec![996.6, 3817.9, 3985.1]);
    let ir: Vec<_> = got.modes.iter().map(|m| m.ir_intensity).collect();
    assert_eq!(ir, vec![0.2986, 0.2853, 0.1333]);

    // the record is offset from the origin, but the output is centered
    let mass: f64 = got.atoms.iter().map(|a| a.mass).sum();
    let com_z: f64 =
        got.atoms.iter().map(|a| a.mass * a.z).sum::<f64>() / mass;
    assert!(com_z.abs() < 1e-5);
    assert_eq!(got.atoms[0].x, 0.0);
}

#[test]
fn process_linear() {
    let config = Config::new("testfiles/records", "out", vec![]);
    let got = process_record(
        &config,
        "carbon_dioxide",
        &Record::load("testfiles/records/qm9s_2.csv").unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(got.formula, "CO2");
    // the two bends have no force constant and fall under the cutoff
    let freqs: Vec<_> = got.modes.iter().map(|m| m.frequency).collect();
    assert_eq!(freqs, vec![1303.7, 2495.5]);
    let idx: Vec<_> = got.modes.iter().map(|m| m.index).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(got.modes[0].ir_intensity, 0.0);
    assert_eq!(got.modes[1].ir_intensity, 1.8916);
    assert!(got.bonds.iter().all(|b| b.order == 2));
}

#[test]
fn no_dipole() {
    let config = Config::new("testfiles/records", "out", vec![]);
    let got = process_record(
        &config,
        "hydrogen_fluoride",
        &Record::load("testfiles/records/3.csv").unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(got.modes.len(), 1);
    assert_eq!(got.modes[0].frequency, 1305.6);
    assert_eq!(got.modes[0].ir_intensity, 0.0);
    let [x, y, z] = got.modes[0].displacements[0];
    assert_eq!((x.abs(), y, z), (1.0, 0.0, 0.0));
}

#[test]
fn batch() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(
        "testfiles/records",
        dir.path().join("out"),
        targets(&[
            (1, "water"),
            (4, "broken"),
            (5, "missing"),
            (3, "hydrogen_fluoride"),
        ]),
    )
    .ir("testfiles/ir.csv");

    let mut out = Vec::new();
    let summary = run(&mut out, &config).unwrap();
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 2);
    assert!(matches!(
        summary.outcomes[1].result,
        Err(Error::Structural(nmodes::Error::NotSquare { rows: 9, cols: 8 }))
    ));
    assert!(matches!(
        summary.outcomes[2].result,
        Err(Error::NotFound { index: 5, .. })
    ));

    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out,
        "water: 3 atoms, 3 modes
broken: failed
missing: failed
hydrogen_fluoride: 2 atoms, 1 modes
"
    );

    let manifest: Vec<ManifestEntry> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("out/index.json")).unwrap(),
    )
    .unwrap();
    let ids: Vec<_> = manifest.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["hydrogen_fluoride", "water"]);

    let water: MoleculeOut = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("out/water.json")).unwrap(),
    )
    .unwrap();
    let spectrum = water.spectrum.unwrap();
    assert_eq!(spectrum.wavenumbers.len(), 351);
    assert_eq!(spectrum.ir[50], 0.2901);
    assert!(spectrum.raman.iter().all(|&r| r == 0.0));
    assert!(!dir.path().join("out/broken.json").exists());
}

#[test]
fn batch_zip() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(
        "testfiles/records.zip",
        dir.path(),
        targets(&[(1, "water"), (3, "hydrogen_fluoride"), (4, "broken")]),
    );
    let summary = run(&mut std::io::sink(), &config).unwrap();
    assert_eq!(summary.succeeded(), 2);
    assert!(matches!(
        summary.outcomes[2].result,
        Err(Error::Structural(nmodes::Error::NotSquare { .. }))
    ));

    let hf: MoleculeOut = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("hydrogen_fluoride.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(hf.modes[0].frequency, 1305.6);
}

#[test]
fn corrupt_curve() {
    let dir = tempfile::tempdir().unwrap();
    let ir = dir.path().join("ir.csv");
    write(&ir, "i,a,b\n0,1.0,2.0\n1,oops,2.0\n").unwrap();
    let config = Config::new(
        "testfiles/records",
        dir.path().join("out"),
        targets(&[(1, "water"), (2, "carbon_dioxide")]),
    )
    .ir(&ir);

    let summary = run(&mut std::io::sink(), &config).unwrap();
    assert_eq!(summary.succeeded(), 2);

    let read = |name: &str| -> MoleculeOut {
        let path = dir.path().join("out").join(format!("{name}.json"));
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    };
    let water = read("water").spectrum.unwrap();
    assert_eq!(water.ir[0], 1.0);
    assert!(water.ir[1..].iter().all(|&x| x == 0.0));
    assert!(read("carbon_dioxide").spectrum.is_none());
}

#[test]
fn invalid_grid() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(
        "testfiles/records",
        dir.path().join("out"),
        targets(&[(1, "water")]),
    );
    let zero = config.clone().grid(500, 4000, 0);
    assert!(matches!(
        run(&mut std::io::sink(), &zero),
        Err(Error::Config(_))
    ));
    let inverted = config.grid(4000, 500, 10);
    assert!(matches!(
        run(&mut std::io::sink(), &inverted),
        Err(Error::Config(_))
    ));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn summary_display() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(
        "testfiles/records",
        dir.path(),
        targets(&[(3, "hydrogen_fluoride"), (5, "missing")]),
    );
    let summary = run(&mut std::io::sink(), &config).unwrap();
    let got = summary.to_string();
    let mut lines = got.lines();
    assert_eq!(
        lines.next(),
        Some("Molecule               Index   Atoms   Modes  Status")
    );
    assert_eq!(
        lines.next(),
        Some("hydrogen_fluoride          3       2       1  ok")
    );
    assert!(lines.next().unwrap().starts_with(
        "missing                    5       -       -  failed: no record file"
    ));
    assert_eq!(lines.next(), Some("1 succeeded, 1 failed"));
}
