use ohi_rs::models::Record;
use ohi_rs::stats::grouped_summary;

fn sample() -> Vec<Record> {
    vec![
        Record::new("Austria", 2017, Some(2.0)),
        Record::new("Austria", 2018, Some(4.0)),
        Record::new("Austria", 2019, Some(6.0)),
        Record::new("Belgium", 2017, Some(10.0)),
        Record::new("Belgium", 2018, None),
    ]
}

#[test]
fn summaries_are_grouped_by_country() {
    let summaries = grouped_summary(&sample());
    assert_eq!(summaries.len(), 2);

    let austria = &summaries[0];
    assert_eq!(austria.key.country, "Austria");
    assert_eq!(austria.count, 3);
    assert_eq!(austria.missing, 0);
    assert_eq!(austria.min, Some(2.0));
    assert_eq!(austria.max, Some(6.0));
    assert_eq!(austria.mean, Some(4.0));
    assert_eq!(austria.median, Some(4.0));

    let belgium = &summaries[1];
    assert_eq!(belgium.count, 1);
    assert_eq!(belgium.missing, 1);
    assert_eq!(belgium.median, Some(10.0));
}

#[test]
fn all_missing_group_still_reported() {
    let records = vec![
        Record::new("Chile", 2018, None),
        Record::new("Chile", 2019, None),
    ];
    let summaries = grouped_summary(&records);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].count, 0);
    assert_eq!(summaries[0].missing, 2);
    assert_eq!(summaries[0].mean, None);
}

#[test]
fn even_count_median_averages_middle_pair() {
    let records = vec![
        Record::new("Austria", 2017, Some(1.0)),
        Record::new("Austria", 2018, Some(2.0)),
        Record::new("Austria", 2019, Some(3.0)),
        Record::new("Austria", 2020, Some(4.0)),
    ];
    let summaries = grouped_summary(&records);
    assert_eq!(summaries[0].median, Some(2.5));
}
