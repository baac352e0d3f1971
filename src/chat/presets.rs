// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Preset prompts offered by the assistant view.

use serde::Serialize;

use crate::error::{ForgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub label_en: &'static str,
    #[serde(skip)]
    prompt_ar: &'static str,
    #[serde(skip)]
    prompt_en: &'static str,
}

impl ChatPreset {
    /// Prompt text for the interface language; Arabic for "ar", English
    /// otherwise.
    pub fn prompt(&self, language: &str) -> &'static str {
        if language == "ar" {
            self.prompt_ar
        } else {
            self.prompt_en
        }
    }
}

pub const PRESETS: &[ChatPreset] = &[
    ChatPreset {
        id: "gpu_problem",
        label: "حل مشكلة في أداء GPU",
        label_en: "Solve GPU Performance Issue",
        prompt_ar: "أنا أواجه مشكلة في أداء بطاقة الرسومات GPU. هل يمكنك مساعدتي في تشخيص المشكلة وتقديم حلول؟",
        prompt_en: "I'm having a GPU performance problem. Can you help me diagnose it and suggest fixes?",
    },
    ChatPreset {
        id: "benchmark_analysis",
        label: "تحليل نتيجة Benchmark",
        label_en: "Analyze Benchmark Results",
        prompt_ar: "قم بتحليل نتائج اختبار الأداء Benchmark الأخيرة واقترح تحسينات ممكنة.",
        prompt_en: "Analyze my latest benchmark results and suggest possible improvements.",
    },
    ChatPreset {
        id: "optimal_settings",
        label: "اقتراح إعدادات مثالية",
        label_en: "Suggest Optimal Settings",
        prompt_ar: "ما هي الإعدادات المثالية لبطاقة RTX 5090 للحصول على أفضل أداء في الألعاب والتطبيقات الاحترافية؟",
        prompt_en: "What are the optimal RTX 5090 settings for the best performance in games and professional applications?",
    },
    ChatPreset {
        id: "app_guide",
        label: "شرح واجهة التطبيق",
        label_en: "App Interface Guide",
        prompt_ar: "أنا مستخدم جديد، هل يمكنك شرح واجهة التطبيق Forge وكيفية استخدام الميزات المختلفة؟",
        prompt_en: "I'm a new user. Can you explain the Forge interface and how to use its features?",
    },
];

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Result<&'static ChatPreset> {
    PRESETS.iter().find(|p| p.id == id).ok_or_else(|| {
        let known: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
        ForgeError::InvalidInput(format!(
            "unknown preset '{}' (expected one of: {})",
            id,
            known.join(", ")
        ))
    })
}
