use asmeval::{contig_lengths, n50};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_n50_empty_and_single() {
    assert_eq!(n50(&[]), 0);
    for len in [1, 7, 150, 1_000_000] {
        assert_eq!(n50(&[len]), len);
    }
}

#[test]
fn test_n50_is_order_independent() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let count = rng.gen_range(1..40);
        let mut lengths: Vec<usize> = (0..count).map(|_| rng.gen_range(1..5_000)).collect();
        let expected = n50(&lengths);
        lengths.shuffle(&mut rng);
        assert_eq!(n50(&lengths), expected);
    }
}

#[test]
fn test_n50_is_one_of_the_lengths() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let count = rng.gen_range(1..40);
        let lengths: Vec<usize> = (0..count).map(|_| rng.gen_range(1..5_000)).collect();
        assert!(lengths.contains(&n50(&lengths)));
    }
}

#[test]
fn test_n50_from_contig_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contig.fasta");
    fs::write(
        &path,
        ">c1\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n\
         >c2\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n\
         >c3\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n\
         >c4\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n\
         >c5\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n",
    )
    .unwrap();

    let lengths = contig_lengths(&path).unwrap();
    assert_eq!(lengths, vec![100, 80, 70, 50, 30]);
    assert_eq!(n50(&lengths), 80);
}

#[test]
fn test_header_only_file_scores_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contig.fasta");
    fs::write(&path, ">contig1\n").unwrap();

    assert!(contig_lengths(&path).unwrap().is_empty());
    assert_eq!(n50(&contig_lengths(&path).unwrap()), 0);
}
