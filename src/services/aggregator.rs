//! 聚合计算：主题总数和每科目的权重表

use std::collections::BTreeMap;

use crate::models::{Subject, Topic, TopicWeights};

/// 递归统计主题节点数（每个节点计 1，包括分组节点）
pub fn compute_total(topics: &[Topic]) -> u32 {
    topics
        .iter()
        .map(|topic| 1 + compute_total(&topic.sub_topics))
        .sum()
}

/// 前序遍历每个科目的主题树，生成 文本 → 题目数 的权重表
///
/// 同一科目内文本重复时，后访问的覆盖先访问的。
pub fn extract_weights(subjects: &[Subject]) -> TopicWeights {
    subjects
        .iter()
        .map(|subject| {
            let mut weights = BTreeMap::new();
            collect_weights(&subject.topics, &mut weights);
            (subject.id.clone(), weights)
        })
        .collect()
}

fn collect_weights(topics: &[Topic], weights: &mut BTreeMap<String, u32>) {
    for topic in topics {
        weights.insert(topic.topic_text.clone(), topic.question_count);
        collect_weights(&topic.sub_topics, weights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preorder_len(topics: &[Topic]) -> u32 {
        let mut stack: Vec<&Topic> = topics.iter().rev().collect();
        let mut visited = 0;
        while let Some(topic) = stack.pop() {
            visited += 1;
            stack.extend(topic.sub_topics.iter().rev());
        }
        visited
    }

    fn sample_tree() -> Vec<Topic> {
        vec![
            Topic::new(
                "Cap. 1",
                10,
                vec![
                    Topic::new("Art. 1", 4, vec![Topic::leaf("§ 1", 2), Topic::leaf("§ 2", 2)]),
                    Topic::leaf("Art. 2", 6),
                ],
            ),
            Topic::leaf("Cap. 2", 0),
        ]
    }

    #[test]
    fn total_matches_preorder_traversal() {
        let tree = sample_tree();
        assert_eq!(compute_total(&tree), preorder_len(&tree));
        assert_eq!(compute_total(&tree), 6);
        assert_eq!(compute_total(&[]), 0);
    }

    #[test]
    fn later_duplicate_text_wins() {
        let subject = Subject::new(
            "Português",
            vec![
                Topic::new("Gramática", 6, vec![Topic::leaf("Introdução", 2)]),
                Topic::leaf("Introdução", 4),
            ],
            0,
        );

        let weights = extract_weights(std::slice::from_ref(&subject));
        let table = &weights[&subject.id];
        assert_eq!(table["Introdução"], 4);
        assert_eq!(table["Gramática"], 6);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn weights_are_scoped_per_subject() {
        let a = Subject::new("A", vec![Topic::leaf("Introdução", 2)], 0);
        let b = Subject::new("B", vec![Topic::leaf("Introdução", 7)], 1);

        let weights = extract_weights(&[a.clone(), b.clone()]);
        assert_eq!(weights[&a.id]["Introdução"], 2);
        assert_eq!(weights[&b.id]["Introdução"], 7);
    }

    #[test]
    fn subject_without_topics_gets_empty_table() {
        let empty = Subject::new("Vazia", Vec::new(), 0);
        let weights = extract_weights(std::slice::from_ref(&empty));
        assert!(weights[&empty.id].is_empty());
    }
}
