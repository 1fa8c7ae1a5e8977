//! Best-score selection and ranking of per-class confidences.

/// Per-class scores past this position are ignored
pub const MAX_RANKED_SCORES: usize = 6;

/// Confidence of one class, already on the 0-100 display scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedScore {
    pub class: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub best: RankedScore,
    /// Every other considered class, highest score first
    pub others: Vec<RankedScore>,
}

/// Scales a 0-1 confidence to the 0-100 display scale
pub fn to_display(score: f64) -> f64 {
    score * 100.0
}

/// Ranking for a record that only carries the predicted class confidence
pub fn rank_single(class: usize, score: f64) -> Ranking {
    Ranking {
        best: RankedScore {
            class,
            score: to_display(score),
        },
        others: Vec::new(),
    }
}

/// Ranks the first `cap` entries of a per-class score vector.
///
/// The best entry is the first maximal score in index order. The remaining
/// entries are sorted by descending score; equal scores keep index order.
/// Returns `None` when nothing is left to rank.
pub fn rank_vector(scores: &[f64], cap: usize) -> Option<Ranking> {
    let considered = &scores[..scores.len().min(cap)];

    let mut best: Option<(usize, f64)> = None;
    for (class, &score) in considered.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((class, score)),
        }
    }
    let (best_class, best_score) = best?;

    let mut others: Vec<RankedScore> = considered
        .iter()
        .enumerate()
        .filter(|(class, _)| *class != best_class)
        .map(|(class, &score)| RankedScore {
            class,
            score: to_display(score),
        })
        .collect();
    others.sort_by(|a, b| b.score.total_cmp(&a.score));

    Some(Ranking {
        best: RankedScore {
            class: best_class,
            score: to_display(best_score),
        },
        others,
    })
}
