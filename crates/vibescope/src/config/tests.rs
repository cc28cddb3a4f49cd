use super::*;

fn target(index: usize, name: &str) -> Target {
    Target {
        index,
        name: name.to_owned(),
    }
}

#[test]
fn config() {
    let got = Config::load("testfiles/test.toml").unwrap();
    let want = Config::new(
        "testfiles/records",
        "out",
        vec![
            target(1, "water"),
            target(2, "carbon_dioxide"),
            target(3, "hydrogen_fluoride"),
            target(4, "broken"),
            target(5, "missing"),
        ],
    )
    .ir("testfiles/ir.csv")
    .raman("testfiles/raman.csv");
    assert_eq!(got, want);
}

#[test]
fn overrides() {
    let got = Config::load("testfiles/nospec.toml").unwrap();
    let want = Config::new(
        "testfiles/records",
        "out",
        vec![target(3, "hydrogen_fluoride"), target(2, "carbon_dioxide")],
    )
    .freq_cutoff(0.0)
    .grid(500, 4000, 5);
    assert_eq!(got, want);
    assert_eq!(got.spectrum_grid().wavenumbers().len(), 701);
}

#[test]
fn unknown_field() {
    let got: Result<Config, _> = toml::from_str(
        r#"
records = "r"
output = "o"
molecules = []
wavenumbers = 3
"#,
    );
    assert!(got.is_err());
}

#[test]
fn invalid() {
    let c = Config::new("r", "o", vec![]).grid(500, 4000, 0);
    assert!(matches!(c.validate(), Err(Error::Config(_))));

    let c = Config::new("r", "o", vec![]).grid(4000, 500, 10);
    assert!(matches!(c.validate(), Err(Error::Config(_))));

    let c = Config::new("r", "o", vec![target(1, "a"), target(2, "a")]);
    assert!(matches!(c.validate(), Err(Error::Config(_))));

    let c = Config::new("r", "o", vec![target(1, "")]);
    assert!(matches!(c.validate(), Err(Error::Config(_))));

    let c = Config::new("r", "o", vec![target(1, "a"), target(1, "b")]);
    assert!(c.validate().is_ok());
}

#[test]
fn missing_file() {
    assert!(matches!(
        Config::load("testfiles/nonexistent.toml"),
        Err(Error::Io { .. })
    ));
}

#[test]
fn derived() {
    let c = Config::new("r", "o", vec![])
        .wave(100.0)
        .linear_thresh(0.5)
        .bond_tolerance(0.3)
        .double_margin(0.0);
    assert_eq!(
        c.harmonic(),
        Harmonic {
            wave: 100.0,
            linear_thresh: 0.5
        }
    );
    assert_eq!(
        c.bond_params(),
        BondParams {
            tolerance: 0.3,
            double_margin: 0.0
        }
    );
    assert_eq!(c.spectrum_grid(), Grid::default());
}
