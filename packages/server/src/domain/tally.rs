//! Vote tally.
//!
//! Pure aggregation of participant score sheets into a ranked option list.
//! The output depends only on the option set and the multiset of sheets, never
//! on the order participants locked in.

use std::{cmp::Reverse, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use super::{entity::ScoreSheet, value_object::OptionName};

/// One entry of a ranking: an option and its aggregate score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOption {
    pub option: OptionName,
    pub total: u32,
}

/// Rank `options` by the sum of every sheet's score for them.
///
/// Higher totals come first; equal totals are ordered by option name,
/// ascending and byte-wise. Scores for options outside `options` are ignored
/// and a sheet without an entry for an option contributes zero to it.
pub fn tally<'a, I>(options: &[OptionName], sheets: I) -> Vec<RankedOption>
where
    I: IntoIterator<Item = &'a ScoreSheet>,
{
    let mut totals: BTreeMap<&OptionName, u32> =
        options.iter().map(|option| (option, 0)).collect();

    for sheet in sheets {
        for (option, score) in sheet {
            if let Some(total) = totals.get_mut(option) {
                *total += u32::from(score.value());
            }
        }
    }

    let mut ranking: Vec<RankedOption> = totals
        .into_iter()
        .map(|(option, total)| RankedOption {
            option: option.clone(),
            total,
        })
        .collect();
    ranking.sort_by(|a, b| {
        (Reverse(a.total), a.option.as_str().as_bytes())
            .cmp(&(Reverse(b.total), b.option.as_str().as_bytes()))
    });
    ranking
}
