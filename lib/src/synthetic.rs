//! Small fixed and seeded datasets used by the descriptive-statistics and
//! probability programs.

use crate::error::Result;
use crate::random::{create_rng, normal_samples, uniform_samples};
use crate::stats::cut;

/// Two paired numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Bivariate {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A numeric column with one category label per value.
#[derive(Debug, Clone, PartialEq)]
pub struct Labeled {
    pub labels: Vec<&'static str>,
    pub values: Vec<f64>,
}

/// Right-closed edges of the study-hour groups.
pub const STUDY_GROUP_EDGES: [f64; 5] = [0.0, 3.0, 5.0, 7.0, 10.0];
pub const STUDY_GROUP_LABELS: [&str; 4] = ["0-3h", "3-5h", "5-7h", "7-10h"];

pub const SALES_CATEGORIES: [&str; 3] = ["Electronics", "Clothing", "Furniture"];
pub const STUDY_METHODS: [&str; 3] = ["Self-Study", "Group", "Tutoring"];

/// Class scores for the z-score report.
pub const STUDENT_SCORES: [(&str, f64); 10] = [
    ("Alice", 78.0),
    ("Bob", 95.0),
    ("Charlie", 50.0),
    ("David", 65.0),
    ("Eva", 88.0),
    ("Frank", 30.0),
    ("Grace", 99.0),
    ("Hank", 45.0),
    ("Ivy", 72.0),
    ("Jack", 60.0),
];

/// `hours ~ N(5, 1.5)`, `score = 30 + 5·hours + N(0, 3)`.
pub fn study_hours_vs_scores(n: usize, seed: u64) -> Result<Bivariate> {
    let mut rng = create_rng(seed);
    let hours = normal_samples(&mut rng, 5.0, 1.5, n)?;
    let noise = normal_samples(&mut rng, 0.0, 3.0, n)?;
    let scores = hours.iter().zip(noise).map(|(h, e)| 30.0 + 5.0 * h + e).collect();
    Ok(Bivariate { x: hours, y: scores })
}

/// Study-group label per value of `hours`, `None` outside `(0, 10]`.
pub fn study_groups(hours: &[f64]) -> Result<Vec<Option<&'static str>>> {
    Ok(cut(hours, &STUDY_GROUP_EDGES)?
        .into_iter()
        .map(|bin| bin.map(|i| STUDY_GROUP_LABELS[i]))
        .collect())
}

/// `years ~ U(0, 20)`, `salary = 40000 + 2500·years + N(0, 10000)` floored at
/// 30000. Years are rounded to one decimal and salaries to the nearest 100.
pub fn experience_vs_salary(n: usize, seed: u64) -> Result<Bivariate> {
    let mut rng = create_rng(seed);
    let years = uniform_samples(&mut rng, 0.0, 20.0, n)?;
    let noise = normal_samples(&mut rng, 0.0, 10_000.0, n)?;
    let salary = years
        .iter()
        .zip(noise)
        .map(|(y, e)| {
            let s = (40_000.0 + 2_500.0 * y + e).max(30_000.0);
            (s / 100.0).round_ties_even() * 100.0
        })
        .collect();
    let years = years
        .into_iter()
        .map(|y| (y * 10.0).round_ties_even() / 10.0)
        .collect();
    Ok(Bivariate { x: years, y: salary })
}

/// Fixed study-method outcomes: Self-Study 8 pass / 12 fail, Group 15 / 5,
/// Tutoring 18 / 2. Returns `(methods, results)` as parallel columns.
pub fn study_method_outcomes() -> (Vec<&'static str>, Vec<&'static str>) {
    let counts = [(STUDY_METHODS[0], 8, 12), (STUDY_METHODS[1], 15, 5), (STUDY_METHODS[2], 18, 2)];
    let mut methods = Vec::with_capacity(60);
    let mut results = Vec::with_capacity(60);
    for (method, pass, fail) in counts {
        methods.extend(std::iter::repeat(method).take(pass + fail));
        results.extend(std::iter::repeat("Pass").take(pass));
        results.extend(std::iter::repeat("Fail").take(fail));
    }
    (methods, results)
}

/// Sales per product category. Furniture mixes 25 ordinary sales with 5
/// large ones so its box plot shows outliers.
pub fn category_sales(seed: u64) -> Result<Labeled> {
    let mut rng = create_rng(seed);
    let mut labels = Vec::with_capacity(90);
    let mut values = Vec::with_capacity(90);

    let parts: [(&'static str, f64, f64, usize); 4] = [
        ("Electronics", 1200.0, 300.0, 30),
        ("Clothing", 800.0, 150.0, 30),
        ("Furniture", 500.0, 200.0, 25),
        ("Furniture", 1500.0, 100.0, 5),
    ];
    for (category, mean, std, n) in parts {
        values.extend(normal_samples(&mut rng, mean, std, n)?);
        labels.extend(std::iter::repeat(category).take(n));
    }
    Ok(Labeled { labels, values })
}

/// Fixed ten-student score table by study method.
pub fn study_method_scores() -> Labeled {
    let [self_study, group, tutoring] = STUDY_METHODS;
    Labeled {
        labels: vec![
            self_study, group, tutoring, self_study, group, tutoring, self_study, group, tutoring,
            self_study,
        ],
        values: vec![72.0, 88.0, 95.0, 68.0, 82.0, 91.0, 75.0, 85.0, 89.0, 70.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{crosstab, group_values, mean, pearson_correlation};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_study_hours_strongly_correlated() {
        let data = study_hours_vs_scores(100, 42).unwrap();
        assert_eq!(data.x.len(), 100);
        let r = pearson_correlation(&data.x, &data.y).unwrap();
        assert!(r > 0.85, "correlation {r}");
    }

    #[test]
    fn test_study_groups_labels() {
        let groups = study_groups(&[2.0, 3.0, 4.5, 6.9, 7.0, 10.0, -1.0, 11.0]).unwrap();
        assert_eq!(
            groups,
            vec![
                Some("0-3h"),
                Some("0-3h"),
                Some("3-5h"),
                Some("5-7h"),
                Some("5-7h"),
                Some("7-10h"),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_salary_floor_and_rounding() {
        let data = experience_vs_salary(200, 42).unwrap();
        assert!(data.y.iter().all(|&s| s >= 30_000.0));
        assert!(data.y.iter().all(|&s| (s / 100.0).fract() == 0.0));
        assert!(data
            .x
            .iter()
            .all(|&y| ((y * 10.0).round() - y * 10.0).abs() < 1e-9 && (0.0..=20.0).contains(&y)));
    }

    #[test]
    fn test_outcome_crosstab() {
        let (methods, results) = study_method_outcomes();
        assert_eq!(methods.len(), 60);
        let table = crosstab(&methods, &results).unwrap();
        assert_eq!(table.count("Self-Study", "Pass"), Some(8));
        assert_eq!(table.count("Self-Study", "Fail"), Some(12));
        assert_eq!(table.count("Group", "Pass"), Some(15));
        assert_eq!(table.count("Group", "Fail"), Some(5));
        assert_eq!(table.count("Tutoring", "Pass"), Some(18));
        assert_eq!(table.count("Tutoring", "Fail"), Some(2));
    }

    #[test]
    fn test_category_sales_layout() {
        let sales = category_sales(42).unwrap();
        assert_eq!(sales.values.len(), 90);
        let groups = group_values(&sales.labels, &sales.values, &SALES_CATEGORIES);
        let sizes: Vec<usize> = groups.iter().map(|(_, v)| v.len()).collect();
        assert_eq!(sizes, vec![30, 30, 30]);
    }

    #[test]
    fn test_study_method_means() {
        let scores = study_method_scores();
        let groups = group_values(&scores.labels, &scores.values, &STUDY_METHODS);
        let means: Vec<f64> = groups.iter().map(|(_, v)| mean(v).unwrap()).collect();
        assert_abs_diff_eq!(means[0], 71.25);
        assert_abs_diff_eq!(means[1], 85.0);
        assert_abs_diff_eq!(means[2], 91.666_666_666_666_67, epsilon = 1e-9);
    }

    #[test]
    fn test_student_scores_mean() {
        // Scores sum to 682.
        let scores: Vec<f64> = STUDENT_SCORES.iter().map(|(_, s)| *s).collect();
        assert_abs_diff_eq!(mean(&scores).unwrap(), 68.2, epsilon = 1e-12);
    }
}
