use approx::assert_abs_diff_eq;
use natal_chart::angles::{norm360, separation};
use natal_chart::houses::angles::angles_from_lst;
use natal_chart::houses::{CuspQuality, HouseCalculator, HouseCusp, HouseSystem};

const OBLIQUITY: f64 = 23.4392911;

fn placidus(lst: f64, lat: f64) -> Vec<HouseCusp> {
    let angles = angles_from_lst(lst, lat, OBLIQUITY);
    HouseCalculator::new().build_houses(HouseSystem::Placidus, &angles, lat)
}

fn assert_cusp(houses: &[HouseCusp], house: usize, expected: f64) {
    let got = houses[house - 1].position;
    assert!(
        separation(got, expected) < 0.01,
        "house {house}: got {got}, expected {expected}"
    );
}

#[test]
fn test_angles_match_reference_at_london_latitude() {
    // (LST, ASC, MC) at 51.5°N
    let cases = [
        (0.0, 116.56846, 0.0),
        (45.0, 148.38768, 47.46418),
        (123.4, 203.49978, 121.17259),
        (300.0, 59.50291, 297.91055),
    ];
    for (lst, asc, mc) in cases {
        let angles = angles_from_lst(lst, 51.5, OBLIQUITY);
        assert!(separation(angles.ascendant, asc) < 0.01, "ASC at LST {lst}: {}", angles.ascendant);
        assert!(separation(angles.midheaven, mc) < 0.01, "MC at LST {lst}: {}", angles.midheaven);
    }
}

#[test]
fn test_angles_southern_hemisphere() {
    let angles = angles_from_lst(200.0, -33.9, OBLIQUITY);
    assert_abs_diff_eq!(angles.ascendant, 301.73205, epsilon = 0.01);
    assert_abs_diff_eq!(angles.midheaven, 201.63850, epsilon = 0.01);
}

#[test]
fn test_placidus_reference_cusps() {
    let houses = placidus(0.0, 51.5);
    assert_cusp(&houses, 11, 38.65189);
    assert_cusp(&houses, 12, 82.43462);
    assert_cusp(&houses, 2, 132.62370);
    assert_cusp(&houses, 3, 152.55256);

    let houses = placidus(123.4, 51.5);
    assert_cusp(&houses, 11, 155.62368);
    assert_cusp(&houses, 12, 182.71796);
    assert_cusp(&houses, 2, 230.02670);
    assert_cusp(&houses, 3, 263.10968);

    let houses = placidus(300.0, 40.0);
    assert_cusp(&houses, 1, 47.33707);
    assert_cusp(&houses, 11, 323.77799);
    assert_cusp(&houses, 12, 0.0);
    assert_cusp(&houses, 2, 74.90603);
    assert_cusp(&houses, 3, 96.47772);
}

#[test]
fn test_placidus_opposite_cusps() {
    let houses = placidus(123.4, 51.5);
    for i in 0..6 {
        let opposite = norm360(houses[i].position + 180.0);
        assert!(separation(houses[i + 6].position, opposite) < 1e-6);
    }
}

#[test]
fn test_placidus_angles_are_exact_cusps() {
    let angles = angles_from_lst(77.7, 48.2, OBLIQUITY);
    let houses = HouseCalculator::new().build_houses(HouseSystem::Placidus, &angles, 48.2);

    assert_eq!(houses[0].position, angles.ascendant);
    assert_eq!(houses[3].position, norm360(angles.midheaven + 180.0));
    assert_eq!(houses[6].position, norm360(angles.ascendant + 180.0));
    assert_eq!(houses[9].position, angles.midheaven);
    // non-degenerate quadrants
    assert!(separation(houses[10].position, houses[0].position) > 1.0);
    assert!(separation(houses[1].position, houses[3].position) > 1.0);
    assert!(houses.iter().all(|h| h.quality == CuspQuality::Exact));
}

#[test]
fn test_all_systems_give_twelve_numbered_cusps() {
    let calc = HouseCalculator::new();
    for lat in [-60.0, -33.9, 0.0, 23.4, 51.5, 66.0] {
        for lst in (0..360).step_by(37) {
            let angles = angles_from_lst(lst as f64, lat, OBLIQUITY);
            for system in HouseSystem::ALL {
                let houses = calc.build_houses(system, &angles, lat);
                assert_eq!(houses.len(), 12);
                for (i, h) in houses.iter().enumerate() {
                    assert_eq!(h.house as usize, i + 1);
                    assert!((0.0..360.0).contains(&h.position), "{system} {lat} {lst}: {}", h.position);
                }
            }
        }
    }
}

#[test]
fn test_whole_sign_cusps_are_sign_boundaries() {
    let angles = angles_from_lst(210.0, -20.0, OBLIQUITY);
    let houses = HouseCalculator::new().build_houses(HouseSystem::WholeSign, &angles, -20.0);
    for h in &houses {
        assert_eq!(h.position % 30.0, 0.0);
        assert_eq!(h.zodiac_sign.degree, 0);
    }
    assert_eq!(houses[0].zodiac_sign.sign, natal_chart::zodiac::to_sign(angles.ascendant).sign);
}

#[test]
fn test_equal_houses_follow_ascendant() {
    let angles = angles_from_lst(123.4, 51.5, OBLIQUITY);
    let houses = HouseCalculator::new().build_houses(HouseSystem::Equal, &angles, 51.5);
    for (i, h) in houses.iter().enumerate() {
        assert_eq!(h.position, norm360(angles.ascendant + 30.0 * i as f64));
    }
}

#[test]
fn test_placidus_near_pole_is_well_formed() {
    let houses = placidus(0.0, 85.0);

    assert_eq!(houses.len(), 12);
    assert!(houses.iter().all(|h| h.position.is_finite() && (0.0..360.0).contains(&h.position)));
    assert!(houses.iter().any(|h| h.quality.is_approximate()));
    // the angles themselves never degrade
    for i in [0, 3, 6, 9] {
        assert_eq!(houses[i].quality, CuspQuality::Exact);
    }
}

#[test]
fn test_house_system_names() {
    assert_eq!("whole".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
    assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
    assert!("koch".parse::<HouseSystem>().is_err());
}
