//! Validation and resolution of input records into render-ready objects.

use crate::classes::{ClassInfo, ClassSet};
use crate::color::ColorStrategy;
use crate::error::{ValidationError, Violation, ViolationKind};
use crate::input::{InputDocument, InputObject, Scores};
use crate::score::{rank_single, rank_vector, Ranking, MAX_RANKED_SCORES};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Characters escaped when a file path becomes a URL path. `/` is kept.
const URL_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    pub class: ClassInfo,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundTruth {
    pub class: ClassInfo,
    /// Label equals the predicted class
    pub matches: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewObject {
    pub id: String,
    pub file_path: String,
    /// `file_path` as a URL path served by the raw-file route
    pub file_url: String,
    pub class: ClassInfo,
    /// Best score on the 0-100 scale
    pub confidence: f64,
    pub ground_truth: Option<GroundTruth>,
    /// Remaining ranked classes, highest first; empty for single-score input
    pub other_scores: Vec<ScoreView>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub labeled: usize,
    pub correct: usize,
    /// Percentage of labeled objects predicted correctly
    pub accuracy: Option<f64>,
}

/// Everything the gallery needs, built once at startup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub classes: Vec<ClassInfo>,
    pub objects: Vec<ViewObject>,
    pub summary: Summary,
}

impl ViewModel {
    /// Reads, validates and resolves an input file
    pub async fn load(path: &Path, colors: &ColorStrategy) -> crate::Result<Self> {
        let document = InputDocument::load(path).await?;
        Ok(Self::from_document(document, colors)?)
    }

    pub fn from_document(
        document: InputDocument,
        colors: &ColorStrategy,
    ) -> Result<Self, ValidationError> {
        let (classes, objects) = document.into_parts();
        ViewModelBuilder::new(colors).build(&classes, objects)
    }
}

/// A record that passed validation, with indices resolved
struct Resolved {
    explicit_id: Option<String>,
    file_path: String,
    label: Option<usize>,
    ranking: Ranking,
}

pub struct ViewModelBuilder<'a> {
    colors: &'a ColorStrategy,
}

impl<'a> ViewModelBuilder<'a> {
    pub fn new(colors: &'a ColorStrategy) -> Self {
        Self { colors }
    }

    /// Validates every record, then resolves names, colors, rankings and ids.
    ///
    /// Fails with every violation found across the whole batch. Object order
    /// follows the input.
    pub fn build(
        &self,
        classes: &ClassSet,
        objects: Vec<InputObject>,
    ) -> Result<ViewModel, ValidationError> {
        let mut violations = Vec::new();
        let mut explicit_ids = HashSet::new();
        let mut resolved = Vec::with_capacity(objects.len());

        for (index, mut object) in objects.into_iter().enumerate() {
            // An empty id counts as absent
            object.id = object.id.take().filter(|id| !id.is_empty());
            let mut kinds = Vec::new();
            if let Some(id) = &object.id {
                if !explicit_ids.insert(id.clone()) {
                    kinds.push(ViolationKind::DuplicateId(id.clone()));
                }
            }
            match self.resolve(classes, object) {
                Ok(record) if kinds.is_empty() => resolved.push(record),
                Ok(_) => {}
                Err(mut errors) => kinds.append(&mut errors),
            }
            violations.extend(kinds.into_iter().map(|kind| Violation {
                object: index,
                kind,
            }));
        }

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        let infos: Vec<ClassInfo> = classes
            .names()
            .zip(self.colors.colors_for(classes.len()))
            .enumerate()
            .map(|(index, (name, color))| ClassInfo {
                index,
                name: name.to_string(),
                color,
            })
            .collect();

        let mut ids = IdAllocator::new(explicit_ids);
        let objects: Vec<ViewObject> = resolved
            .into_iter()
            .map(|mut record| {
                let id = match record.explicit_id.take() {
                    Some(id) => id,
                    None => ids.derive(&record.file_path),
                };
                view_object(&infos, id, record)
            })
            .collect();

        let summary = summarize(&objects);
        tracing::debug!(
            classes = infos.len(),
            objects = objects.len(),
            labeled = summary.labeled,
            "Built view model"
        );

        Ok(ViewModel {
            classes: infos,
            objects,
            summary,
        })
    }

    fn resolve(
        &self,
        classes: &ClassSet,
        object: InputObject,
    ) -> Result<Resolved, Vec<ViolationKind>> {
        let mut kinds = Vec::new();

        let class = classes.index(object.class);
        if class.is_none() {
            kinds.push(ViolationKind::ClassOutOfRange {
                class: object.class,
                classes: classes.len(),
            });
        }

        let label = match object.label {
            Some(raw) => {
                let label = classes.index(raw);
                if label.is_none() {
                    kinds.push(ViolationKind::LabelOutOfRange {
                        label: raw,
                        classes: classes.len(),
                    });
                }
                label
            }
            None => None,
        };

        let considered: &[f64] = match &object.scores {
            Scores::Single(score) => std::slice::from_ref(score),
            Scores::PerClass(scores) => {
                let considered = &scores[..scores.len().min(MAX_RANKED_SCORES)];
                if scores.is_empty() {
                    kinds.push(ViolationKind::EmptyScores);
                } else if considered.len() > classes.len() {
                    kinds.push(ViolationKind::TooManyScores {
                        scores: considered.len(),
                        classes: classes.len(),
                    });
                }
                considered
            }
        };
        for (position, &score) in considered.iter().enumerate() {
            if !(0.0..=1.0).contains(&score) {
                kinds.push(ViolationKind::ScoreOutOfRange { position, score });
            }
        }

        let ranking = match (&object.scores, class) {
            (Scores::Single(score), Some(class)) => Some(rank_single(class, *score)),
            (Scores::PerClass(scores), Some(class)) => {
                let ranking = rank_vector(scores, MAX_RANKED_SCORES);
                if let Some(ranking) = &ranking {
                    if ranking.best.class != class {
                        tracing::debug!(
                            file = %object.file_path,
                            class,
                            best = ranking.best.class,
                            "Predicted class disagrees with best score, using best score"
                        );
                    }
                }
                ranking
            }
            (_, None) => None,
        };

        match (class, ranking) {
            (Some(_), Some(ranking)) if kinds.is_empty() => Ok(Resolved {
                explicit_id: object.id,
                file_path: object.file_path,
                label,
                ranking,
            }),
            _ => Err(kinds),
        }
    }
}

fn view_object(infos: &[ClassInfo], id: String, record: Resolved) -> ViewObject {
    // Score-vector input shows the best-ranked class as the prediction
    let predicted = record.ranking.best.class;

    let ground_truth = record.label.map(|label| GroundTruth {
        class: infos[label].clone(),
        matches: label == predicted,
    });

    let other_scores = record
        .ranking
        .others
        .iter()
        .map(|s| ScoreView {
            class: infos[s.class].clone(),
            score: s.score,
        })
        .collect();

    ViewObject {
        id,
        file_url: file_url(&record.file_path),
        file_path: record.file_path,
        class: infos[predicted].clone(),
        confidence: record.ranking.best.score,
        ground_truth,
        other_scores,
    }
}

fn summarize(objects: &[ViewObject]) -> Summary {
    let labeled = objects.iter().filter(|o| o.ground_truth.is_some()).count();
    let correct = objects
        .iter()
        .filter(|o| o.ground_truth.as_ref().is_some_and(|gt| gt.matches))
        .count();
    Summary {
        total: objects.len(),
        labeled,
        correct,
        accuracy: (labeled > 0).then(|| correct as f64 * 100.0 / labeled as f64),
    }
}

/// URL path for a local file, always rooted at `/`
pub fn file_url(file_path: &str) -> String {
    let encoded = utf8_percent_encode(file_path, URL_PATH).to_string();
    if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{}", encoded)
    }
}

/// Hands out ids derived from file names, unique within one build
struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    fn new(explicit: HashSet<String>) -> Self {
        Self { used: explicit }
    }

    fn derive(&mut self, file_path: &str) -> String {
        let base = match file_path.rsplit(['/', '\\']).find(|s| !s.is_empty()) {
            Some(segment) => segment.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        candidate
    }
}
