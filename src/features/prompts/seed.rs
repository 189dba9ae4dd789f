/// A starter prompt inserted into an empty table
pub struct SeedPrompt {
    pub key: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

// Stored verbatim; downstream assistants consume these texts as-is
pub const DEFAULT_PROMPTS: &[SeedPrompt] = &[
    SeedPrompt {
        key: "strategy_planning",
        description: "戦略立案用システムプロンプト",
        text: "あなたは戦略立案の専門家です。ユーザーリクエストを分析し、必要最小限のツールのみを選択してください。",
    },
    SeedPrompt {
        key: "integration_response",
        description: "回答統合用システムプロンプト",
        text: "証券会社の社内情報システムとして回答してください。",
    },
    SeedPrompt {
        key: "simple_chat",
        description: "シンプルチャット用システムプロンプト",
        text: "あなたは親切な金融商品アドバイザーです。ユーザーの質問に対して、親しみやすく分かりやすい回答をしてください。",
    },
];
