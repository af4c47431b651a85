//! Known model vendors and their defaults.

/// Wire protocol a vendor speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    AnthropicMessages,
    ChatCompletions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPreset {
    pub id: &'static str,
    pub display_name: &'static str,
    pub protocol: Protocol,
    /// Empty for `custom`, which needs an explicit URL.
    pub base_url: &'static str,
    pub default_model: &'static str,
    pub api_key_env: &'static str,
}

const fn chat(
    id: &'static str,
    display_name: &'static str,
    base_url: &'static str,
    default_model: &'static str,
    api_key_env: &'static str,
) -> ProviderPreset {
    ProviderPreset {
        id,
        display_name,
        protocol: Protocol::ChatCompletions,
        base_url,
        default_model,
        api_key_env,
    }
}

pub const PRESETS: &[ProviderPreset] = &[
    ProviderPreset {
        id: "anthropic",
        display_name: "Anthropic Claude",
        protocol: Protocol::AnthropicMessages,
        base_url: "https://api.anthropic.com",
        default_model: "claude-sonnet-4-5-20250929",
        api_key_env: "ANTHROPIC_API_KEY",
    },
    chat("openai", "OpenAI", "https://api.openai.com/v1", "gpt-4", "OPENAI_API_KEY"),
    chat("deepseek", "DeepSeek", "https://api.deepseek.com/v1", "deepseek-chat", "DEEPSEEK_API_KEY"),
    chat(
        "qwen",
        "Alibaba Qwen",
        "https://dashscope.aliyuncs.com/compatible-mode/v1",
        "qwen-plus",
        "DASHSCOPE_API_KEY",
    ),
    chat("moonshot", "Moonshot AI", "https://api.moonshot.cn/v1", "moonshot-v1-8k", "MOONSHOT_API_KEY"),
    chat("glm", "Zhipu GLM", "https://open.bigmodel.cn/api/paas/v4", "glm-4", "ZHIPUAI_API_KEY"),
    chat("xai", "xAI Grok", "https://api.x.ai/v1", "grok-beta", "XAI_API_KEY"),
    chat("minimax", "MiniMax", "https://api.minimax.chat/v1", "abab6.5-chat", "MINIMAX_API_KEY"),
    chat("baichuan", "Baichuan", "https://api.baichuan-ai.com/v1", "Baichuan2-Turbo", "BAICHUAN_API_KEY"),
    chat("01ai", "01.AI Yi", "https://api.01.ai/v1", "yi-large", "YI_API_KEY"),
    chat(
        "groq",
        "Groq",
        "https://api.groq.com/openai/v1",
        "llama-3.1-70b-versatile",
        "GROQ_API_KEY",
    ),
    chat(
        "together",
        "Together AI",
        "https://api.together.xyz/v1",
        "meta-llama/Llama-3-70b-chat-hf",
        "TOGETHER_API_KEY",
    ),
    chat(
        "siliconflow",
        "SiliconFlow",
        "https://api.siliconflow.cn/v1",
        "deepseek-ai/DeepSeek-V2.5",
        "SILICONFLOW_API_KEY",
    ),
    chat("custom", "Custom endpoint", "", "", "HOSTSCOPE_API_KEY"),
];

/// Look up a preset by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static ProviderPreset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.id)
}
