use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// 폼 기반 계산기 모음
#[derive(Parser, Debug)]
#[command(name = "formula_toolbox", version)]
#[command(about = "Collection of small validated calculators", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// 표시 언어 (ko, en, auto)
    #[arg(long, global = true, default_value = "auto")]
    pub lang: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 등록된 계산기 목록
    List,
    /// 계산기 입력 필드 설명
    Describe {
        /// 계산기 id
        id: String,
    },
    /// 계산기를 한 번 실행
    Run {
        /// 계산기 id
        id: String,
        /// 필드 값 (`field=value`, 반복 가능)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
        /// 결과를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 단위 변환
    Convert {
        /// 물리량 (area, length, mass, volume, torque, speed, time, energy, pressure, temperature)
        kind: String,
        value: f64,
        from: String,
        /// 생략하면 설정의 기본 단위
        to: Option<String>,
    },
    /// 대화형 메뉴 (기본)
    Interactive,
}
