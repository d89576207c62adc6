//! src/server/main.ts generator.

use std::path::PathBuf;

use create_kyrix_core::GeneratedFile;

/// Which client the server hands to tRPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerDb {
    Prisma,
    Drizzle,
    /// Mongoose connects once at startup; the tRPC context carries no client.
    Mongoose,
}

/// The HTTP server bootstrap: tRPC handler, Vite dev server and Kyrix SSR.
pub struct MainTs {
    db: ServerDb,
}

impl MainTs {
    pub fn new(db: ServerDb) -> Self {
        Self { db }
    }
}

impl GeneratedFile for MainTs {
    fn path(&self) -> PathBuf {
        PathBuf::from("src").join("server").join("main.ts")
    }

    fn render(&self) -> String {
        let (db_import, db_arg, connect) = match self.db {
            ServerDb::Prisma => ("import prisma from './connect.db';", ", db: prisma", ""),
            ServerDb::Drizzle => ("import { db } from './connect.db';", ", db", ""),
            ServerDb::Mongoose => (
                "import connectDB from './connect.db';",
                "",
                "\nconnectDB();\n",
            ),
        };

        format!(
            r#"import http from 'http';
import type {{ ViteDevServer }} from 'vite';
import {{ createCallerFactory }} from '@trpc/server';
import {{ createHTTPHandler }} from '@trpc/server/adapters/standalone';

import {{
  createKyrixMiddleware,
  createViteDevServer,
  execMiddlewares,
  type SSRData,
}} from '@kyrix/server';

import {{ serverEnv as env }} from './env';
import {{ appRouter }} from './trpc/root';
import {{ createTRPCContext }} from './trpc/trpc';
import {{ middlewareFactory }} from './middlewares';
{db_import}

const root = process.cwd();
const isProduction = env.NODE_ENV === 'production';
const BASE = process.env.BASE || '/';

// All paths under /api/trpc are served by tRPC.
const trpcHandler = createHTTPHandler({{
  router: appRouter,
  createContext: (args) => createTRPCContext({{ ...args, serverEnv: env{db_arg} }}),
  batching: {{ enabled: true }},
  onError: ({{ error }}) => console.error(`HTTP TRPC ERROR ${{error.message}}`),
}});

let vite: ViteDevServer | undefined;
(async function () {{
  if (!isProduction) {{
    const react = (await import('@vitejs/plugin-react-swc')).default;
    vite = await createViteDevServer({{
      port: env.SERVER_PORT,
      viteConfig: {{
        base: BASE,
        plugins: [react()],
      }},
    }});
  }}
}})();
{connect}
http
  .createServer((req, res) => {{
    execMiddlewares(req, res, [...middlewareFactory], async (req, res) => {{
      if (req.url?.startsWith('/api/trpc')) {{
        req.url = req.url?.replace('/api/trpc', '');
        return trpcHandler(req, res);
      }}

      const callerFactory = createCallerFactory()(appRouter);
      const trpcCaller = callerFactory({{ req, res, env{db_arg} }});

      let data: SSRData = {{ meta: undefined, initialData: undefined }};
      try {{
        data = await trpcCaller.kyrix.ssr({{ path: req.url || '/' }});
      }} catch {{
        data = {{ meta: undefined, initialData: undefined }};
      }}

      const kyrixServe = createKyrixMiddleware({{
        isProduction,
        root,
        port: env.SERVER_PORT,
        viteServer: vite,
        ssrData: data,
      }});

      return kyrixServe(req, res);
    }});
  }})
  .listen(env.SERVER_PORT, 'localhost', () => {{
    console.log(`Server running on http://localhost:${{env.SERVER_PORT}}`);
  }});
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prisma_passes_client_to_context() {
        let content = MainTs::new(ServerDb::Prisma).render();
        assert!(content.contains("import prisma from './connect.db';"));
        assert!(content.contains("createTRPCContext({ ...args, serverEnv: env, db: prisma })"));
        assert!(content.contains("callerFactory({ req, res, env, db: prisma })"));
        assert!(!content.contains("connectDB"));
    }

    #[test]
    fn test_mongoose_connects_at_startup() {
        let content = MainTs::new(ServerDb::Mongoose).render();
        assert!(content.contains("import connectDB from './connect.db';"));
        assert!(content.contains("})();\n\nconnectDB();\n\nhttp"));
        assert!(content.contains("callerFactory({ req, res, env })"));
    }

    #[test]
    fn test_template_literals_survive_formatting() {
        let content = MainTs::new(ServerDb::Drizzle).render();
        assert!(content.contains("`HTTP TRPC ERROR ${error.message}`"));
        assert!(content.contains("`Server running on http://localhost:${env.SERVER_PORT}`"));
        assert!(content.contains("})();\n\nhttp"));
    }
}
