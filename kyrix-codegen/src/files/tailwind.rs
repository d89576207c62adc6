//! Tailwind CSS setup: tailwind/postcss/vite configs, node tsconfig and global stylesheet.

use std::path::PathBuf;

use create_kyrix_core::GeneratedFile;

/// tailwind.config.ts
pub struct TailwindConfig;

impl GeneratedFile for TailwindConfig {
    fn path(&self) -> PathBuf {
        PathBuf::from("tailwind.config.ts")
    }

    fn render(&self) -> String {
        r#"import type { Config } from 'tailwindcss';

export default {
  content: ['./index.html', './src/**/*.{js,ts,jsx,tsx}', '!./src/server/**/*'],
  theme: {
    extend: {},
  },
  plugins: [],
} satisfies Config;
"#
        .to_string()
    }
}

/// postcss.config.ts
pub struct PostcssConfig;

impl GeneratedFile for PostcssConfig {
    fn path(&self) -> PathBuf {
        PathBuf::from("postcss.config.ts")
    }

    fn render(&self) -> String {
        r#"import autoprefixer from 'autoprefixer';
import tailwindcss from 'tailwindcss';

export default {
  plugins: [tailwindcss(), autoprefixer()],
};
"#
        .to_string()
    }
}

/// vite.config.ts wired to the postcss config.
pub struct ViteConfig;

impl GeneratedFile for ViteConfig {
    fn path(&self) -> PathBuf {
        PathBuf::from("vite.config.ts")
    }

    fn render(&self) -> String {
        r#"import path from 'path';
import react from '@vitejs/plugin-react-swc';
import { defineConfig } from 'vite';
import postcss from './postcss.config';

export default defineConfig({
  build: {
    outDir: path.resolve(__dirname, 'dist/client'),
  },
  resolve: {
    alias: {
      '@': path.resolve(__dirname, 'src'),
    },
  },
  base: process.env.BASE || '/',
  plugins: [react()],
  css: {
    postcss,
  },
});
"#
        .to_string()
    }
}

/// tsconfig.node.json covering the config files above.
pub struct TsConfigNode;

impl GeneratedFile for TsConfigNode {
    fn path(&self) -> PathBuf {
        PathBuf::from("tsconfig.node.json")
    }

    fn render(&self) -> String {
        r#"{
  "compilerOptions": {
    "module": "esnext",
    "lib": ["ES2023"],
    "target": "ESNext",
    "moduleResolution": "Node",
    "skipLibCheck": true,

    /* Bundler mode */
    "allowImportingTsExtensions": true,
    "allowSyntheticDefaultImports": true,
    "isolatedModules": true,
    "moduleDetection": "force",
    "noEmit": true,

    /* Linting */
    "strict": true,
    "noUnusedLocals": true,
    "noUnusedParameters": true,
    "noFallthroughCasesInSwitch": true,

    "baseUrl": ".",
    "paths": {
      "@kyrix/server": ["./packages/@kyrix/server/index.ts"]
    }
  },
  "include": [
    "vite.config.ts",
    "vite.config.server.ts",
    "postcss.config.ts",
    "tailwind.config.ts",
    "./src/server/**/*",
    "./packages/@kyrix/server/**/*"
  ],
  "exclude": ["node_modules"]
}
"#
        .to_string()
    }
}

/// src/globals.css with the Tailwind layers.
pub struct GlobalsCss;

impl GeneratedFile for GlobalsCss {
    fn path(&self) -> PathBuf {
        PathBuf::from("src").join("globals.css")
    }

    fn render(&self) -> String {
        "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n".to_string()
    }
}

/// Every file of the Tailwind setup.
pub fn files() -> Vec<Box<dyn GeneratedFile>> {
    vec![
        Box::new(TailwindConfig),
        Box::new(PostcssConfig),
        Box::new(ViteConfig),
        Box::new(TsConfigNode),
        Box::new(GlobalsCss),
    ]
}
