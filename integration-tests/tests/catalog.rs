use approx::assert_relative_eq;
use integration_tests::{Scenario, init_logging};
use potflow_core::{Complex64, Fields, Flow, FlowError, Grid};
use potflow_flows::{
    Direction,
    catalog::{FlowKind, FlowSpec},
};
use uom::si::pressure::pascal;

const RANKINE_OVAL: &str = r#"
density = 1.225

[reference]
x0 = -1e10
y0 = 0.0
pressure = 101325.0

[[flows]]
kind = "Uniform"
amplitude = 10.0

[[flows]]
kind = "Fuente"
amplitude = 5.0
x0 = -1.0

[[flows]]
kind = "source"
amplitude = 5.0
output_scale = -1
x0 = 1.0
"#;

#[test]
fn builds_a_rankine_oval_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let scenario = Scenario::from_toml(RANKINE_OVAL)?;

    assert_eq!(scenario.flows.len(), 3);
    assert_eq!(scenario.flows[0].direction, Direction::X);
    assert_eq!(scenario.flows[1].kind, FlowKind::Source);
    assert_eq!(scenario.flows[2].output_scale, -1.0);
    assert_eq!(scenario.flows[2].input_scale, 1.0);

    let context = scenario.context()?;
    let flow = context.flow();

    // The oval is symmetric about both axes.
    let top = flow.velocity_at(Complex64::new(0.3, 1.2));
    let bottom = flow.velocity_at(Complex64::new(0.3, -1.2));
    assert_relative_eq!(top.vx, bottom.vx, max_relative = 1e-12);
    assert_relative_eq!(top.vy, -bottom.vy, max_relative = 1e-12);

    // The dividing streamline ψ = 0 runs along the x axis outside the pair.
    assert_relative_eq!(flow.stream_at(Complex64::new(-3.0, 0.0)), 0.0, epsilon = 1e-12);
    assert_relative_eq!(flow.stream_at(Complex64::new(3.0, 0.0)), 0.0, epsilon = 1e-12);

    // Far upstream the pressure returns to ambient.
    let p = context.pressure_at(-1e6, 0.0)?;
    assert_relative_eq!(p.get::<pascal>(), 101_325.0, max_relative = 1e-9);

    Ok(())
}

#[test]
fn evaluates_every_field_on_a_plot_grid() -> Result<(), Box<dyn std::error::Error>> {
    let context = Scenario::from_toml(RANKINE_OVAL)?.context()?;
    let grid = Grid::with_resolution((-5.1, 5.1), (-2.05, 2.05), 5.0);

    let (vx, vy) = context.velocity(&grid.x, &grid.y)?;
    let psi = context.stream(&grid.x, &grid.y)?;
    let phi = context.potential(&grid.x, &grid.y)?;
    let p = context.pressure(&grid.x, &grid.y)?;

    for field in [&vx, &vy, &psi, &phi, &p] {
        assert_eq!(field.dim(), grid.shape());
        assert!(field.iter().all(|v| v.is_finite()));
    }

    Ok(())
}

#[test]
fn unknown_labels_fail_to_parse() {
    let err = Scenario::from_toml(
        r#"
        [[flows]]
        kind = "Sumidero"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown flow `Sumidero`"));
}

#[test]
fn directions_accept_tokens_and_angles() -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_toml(
        r#"
        [[flows]]
        direction = "y"

        [[flows]]
        direction = 0.5
        "#,
    )?;
    assert_eq!(scenario.flows[0].direction, Direction::Y);
    assert_eq!(scenario.flows[1].direction, Direction::Angle(0.5));

    let flow = scenario.context()?.into_flow();
    let v = flow.velocity_at(Complex64::new(0.0, 0.0));
    assert_relative_eq!(v.vx, 0.5_f64.cos());
    assert_relative_eq!(v.vy, 1.0 + 0.5_f64.sin());

    Ok(())
}

#[test]
fn empty_scenario_has_no_flow() {
    let scenario = Scenario::from_toml("density = 1.0").unwrap();
    assert_eq!(scenario.context().unwrap_err(), FlowError::EmptyComposition);
}

#[test]
fn specs_round_trip_through_toml() -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario {
        flows: vec![
            FlowSpec {
                direction: Direction::Angle(1.0),
                ..FlowSpec::new(FlowKind::Uniform)
            },
            FlowSpec {
                amplitude: -2.0,
                y0: 3.0,
                ..FlowSpec::new(FlowKind::Vortex)
            },
        ],
        ..Scenario::default()
    };

    let text = toml::to_string(&scenario)?;
    assert!(text.contains("kind = \"Irrotational Vortex\""));

    let parsed = Scenario::from_toml(&text)?;
    assert_eq!(parsed.flows, scenario.flows);

    let x = ndarray::array![0.5];
    let y = ndarray::array![-0.5];
    assert_eq!(
        parsed.context()?.flow().stream(&x, &y)?,
        scenario.context()?.flow().stream(&x, &y)?
    );

    Ok(())
}
